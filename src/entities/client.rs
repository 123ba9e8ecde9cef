//! Client entity - The people who commission work.
//!
//! A client is identified by PESEL, which is unique across the table.
//! Deleting a client removes their orders and payments.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Unique identifier for the client
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Primary phone number
    pub phone: String,
    /// Secondary phone number, if the client gave one
    pub alternative_phone: Option<String>,
    /// Contact email
    pub email: String,
    /// Postal address for correspondence
    pub mailing_address: String,
    /// 11-digit national identification number
    #[sea_orm(unique)]
    pub pesel: String,
}

/// Defines relationships between Client and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One client has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One client has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// "First Last", as shown on reports.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
