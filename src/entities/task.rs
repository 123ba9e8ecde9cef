//! Task entity - A unit of work on an order.
//!
//! Tasks generated from a template keep `order_template_id`, which is how
//! default tasks are told apart from ones an operator added later.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Description stored when a task is created without one.
pub const DEFAULT_DESCRIPTION: &str = "Brak opisu";

/// Task database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    /// Unique identifier for the task
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order this task belongs to, if any
    pub order_id: Option<i64>,
    /// Template that produced this task, if it is a default task
    pub order_template_id: Option<i64>,
    /// Short name
    pub name: String,
    /// What has to be done
    pub description: String,
    /// Employee responsible for the task
    pub assigned_to: Option<i64>,
    /// Whether the work is done
    pub completed: bool,
    /// When the task was created
    pub created_at: DateTimeUtc,
    /// Path of a photo documenting the task
    pub image: Option<String>,
}

/// Defines relationships between Task and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A task may belong to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
    /// A task may come from one template
    #[sea_orm(
        belongs_to = "super::order_template::Entity",
        from = "Column::OrderTemplateId",
        to = "super::order_template::Column::Id",
        on_delete = "SetNull"
    )]
    OrderTemplate,
    /// A task may be assigned to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::AssignedTo",
        to = "super::employee::Column::Id",
        on_delete = "SetNull"
    )]
    Employee,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::order_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderTemplate.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
