//! Order template entity - One row per job kind.
//!
//! The row itself only carries the kind and an optional description; the
//! default task checklist for each kind lives in `core::templates`.

use super::enums::TemplateKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order template database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_templates")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Job kind, unique per row
    #[sea_orm(unique)]
    pub kind: TemplateKind,
    /// Free-text description shown next to the template name
    pub description: Option<String>,
}

/// Defines relationships between `OrderTemplate` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One template is used by many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// Tasks generated from this template keep a reference to it
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
