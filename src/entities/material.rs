//! Material entity - Stone and other materials with a unit price.
//!
//! Orders reference materials for the border, frame, main plate and covering.
//! Only the covering material takes part in cost calculation, priced per m².

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Material database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    /// Unique identifier for the material
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Material name (e.g., "Granit Strzegom")
    pub name: String,
    /// Unit price
    pub price: Decimal,
}

/// Orders point at materials; materials hold no foreign keys themselves.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
