//! Photo entity - Site photos attached to an order. Only the path is stored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Photo database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photos")]
pub struct Model {
    /// Unique identifier for the photo
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order the photo documents
    pub order_id: i64,
    /// Path of the stored image
    pub image: String,
    /// When the photo was added
    pub uploaded_at: DateTimeUtc,
}

/// Defines relationships between Photo and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each photo belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
