//! Order entity - A single customer job.
//!
//! Besides location and stone details, an order carries a set of priced
//! optional features (lamp, vase, ball, covering, other accessories) and flat
//! cost fields. `total_cost` is derived from those fields by
//! `core::cost::calculate_total_cost` and written on every save; nothing
//! else assigns it.

use super::enums::{GraveSize, GraveType, OrderStatus, PaymentMethod};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Client who commissioned the job
    pub client_id: i64,
    /// Template the order was created from
    pub template_id: i64,
    /// Free-text description
    pub description: Option<String>,
    /// Lifecycle status
    pub status: OrderStatus,
    /// When the order was created
    pub created_at: DateTimeUtc,

    /// Cemetery town
    pub city: String,
    /// Cemetery street
    pub street: String,
    /// Cemetery plot / quarter
    pub plot: String,
    /// Earth grave or tomb
    pub grave_type: GraveType,
    /// Grave width class
    pub grave_size: GraveSize,
    /// Material used for the border
    pub border_material_id: Option<i64>,
    /// Material used for the frame
    pub frame_material_id: Option<i64>,
    /// Material used for the main plate
    pub main_plate_material_id: Option<i64>,

    /// Lamp ordered
    pub lamp: bool,
    /// Lamp price
    pub lamp_price: Option<Decimal>,
    /// Vase ordered
    pub vase: bool,
    /// Vase price
    pub vase_price: Option<Decimal>,
    /// Decorative ball ordered
    pub ball: bool,
    /// Ball price
    pub ball_price: Option<Decimal>,
    /// Other accessories, free text
    pub other_accessories: Option<String>,
    /// Price of the other accessories
    pub other_accessories_price: Option<Decimal>,

    /// Inscription text
    pub inscription: Option<String>,
    /// Letter colour
    pub letter_color: Option<String>,
    /// Letter font
    pub font: Option<String>,
    /// Path of the scanned inscription layout for the plate
    pub inscription_image: Option<String>,

    /// Covering ordered
    pub covering: bool,
    /// Material the covering is made of, priced per m²
    pub covering_material_id: Option<i64>,
    /// Covering area in m²
    pub covering_quantity: Option<Decimal>,
    /// Curbs in running metres, informational only
    pub curbs_quantity: Option<Decimal>,

    /// Cost of making the monument
    pub monument_cost: Option<Decimal>,
    /// Removal of the old monument
    pub old_monument_removal: Option<Decimal>,
    /// Cemetery fee
    pub cemetery_fee: Option<Decimal>,
    /// Transport
    pub transport_cost: Option<Decimal>,
    /// Other costs, free text
    pub other_costs: Option<String>,
    /// Price of the other costs
    pub other_costs_price: Option<Decimal>,

    /// Agreed completion date
    pub completion_date: Option<Date>,
    /// Advance paid when the order was placed
    pub advance_payment: Option<Decimal>,
    /// Preferred payment method
    pub payment_method: Option<PaymentMethod>,
    /// Sum of all priced fields, recomputed on every save
    pub total_cost: Option<Decimal>,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
    /// Each order was created from one template
    #[sea_orm(
        belongs_to = "super::order_template::Entity",
        from = "Column::TemplateId",
        to = "super::order_template::Column::Id",
        on_delete = "Cascade"
    )]
    Template,
    /// Border material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::BorderMaterialId",
        to = "super::material::Column::Id",
        on_delete = "SetNull"
    )]
    BorderMaterial,
    /// Frame material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::FrameMaterialId",
        to = "super::material::Column::Id",
        on_delete = "SetNull"
    )]
    FrameMaterial,
    /// Main plate material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MainPlateMaterialId",
        to = "super::material::Column::Id",
        on_delete = "SetNull"
    )]
    MainPlateMaterial,
    /// Covering material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::CoveringMaterialId",
        to = "super::material::Column::Id",
        on_delete = "SetNull"
    )]
    CoveringMaterial,
    /// One order has many tasks
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
    /// One order has many photos
    #[sea_orm(has_many = "super::photo::Entity")]
    Photos,
    /// One order has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::order_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::photo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photos.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
