//! Shared test utilities for the workshop organiser.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        client::{self, ClientDetails},
        employee, material,
        order::{self, OrderFields},
    },
    entities::{self, TemplateKind},
    errors::Result,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness so it only shows for
/// failing tests. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test client named "Jan Kowalski" with the given PESEL.
pub async fn create_test_client(
    db: &DatabaseConnection,
    pesel: &str,
) -> Result<entities::client::Model> {
    client::create_client(
        db,
        ClientDetails {
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            phone: "600123456".to_string(),
            alternative_phone: None,
            email: "jan.kowalski@example.pl".to_string(),
            mailing_address: "ul. Floriańska 5, 31-019 Kraków".to_string(),
            pesel: pesel.to_string(),
        },
    )
    .await
}

/// Creates a test employee (a stonemason).
pub async fn create_test_employee(db: &DatabaseConnection) -> Result<entities::employee::Model> {
    employee::create_employee(
        db,
        "Marek".to_string(),
        "Kamiński".to_string(),
        "Kamieniarz".to_string(),
        None,
    )
    .await
}

/// Creates a test material with the given name and unit price.
pub async fn create_test_material(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
) -> Result<entities::material::Model> {
    material::create_material(db, name.to_string(), price).await
}

/// Inserts the template row for `kind` without any description.
pub async fn create_test_template(
    db: &DatabaseConnection,
    kind: TemplateKind,
) -> Result<entities::order_template::Model> {
    let model = entities::order_template::ActiveModel {
        kind: Set(kind),
        description: Set(None),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Order fields with a filled-in address and nothing priced.
///
/// `client_id` and `template_id` are zero; callers set them.
#[must_use]
pub fn test_order_fields() -> OrderFields {
    OrderFields {
        city: "Kraków".to_string(),
        street: "Cmentarz Rakowicki".to_string(),
        plot: "LXV-12-3".to_string(),
        ..OrderFields::default()
    }
}

/// Creates a client, the template for `kind` and an unpriced order using them.
pub async fn create_test_order_with_template(
    db: &DatabaseConnection,
    kind: TemplateKind,
) -> Result<entities::order::Model> {
    let client = create_test_client(db, "80020254321").await?;
    let template = create_test_template(db, kind).await?;

    order::create_order(
        db,
        OrderFields {
            client_id: client.id,
            template_id: template.id,
            ..test_order_fields()
        },
    )
    .await
}

/// Common setup: a monument installation order for "Jan Kowalski".
///
/// # Defaults
/// * covering: material priced 100, 2 m² (100 * 2 + 70 = 270)
/// * `monument_cost`: 5000
/// * `advance_payment`: 500
/// * `total_cost`: 5270
pub async fn setup_with_order() -> Result<(DatabaseConnection, entities::order::Model)> {
    let db = setup_test_db().await?;
    let client = create_test_client(&db, "90010112345").await?;
    let template = create_test_template(&db, TemplateKind::MonumentInstallation).await?;
    let granite = create_test_material(&db, "Granit Strzegom", Decimal::from(100)).await?;

    let order = order::create_order(
        &db,
        OrderFields {
            client_id: client.id,
            template_id: template.id,
            covering: true,
            covering_material_id: Some(granite.id),
            covering_quantity: Some(Decimal::from(2)),
            monument_cost: Some(Decimal::from(5000)),
            advance_payment: Some(Decimal::from(500)),
            ..test_order_fields()
        },
    )
    .await?;

    Ok((db, order))
}

/// Builds an in-memory order row from `fields`, as if it had just been
/// inserted without a computed total.
#[must_use]
pub fn order_model_from_fields(id: i64, fields: &OrderFields) -> entities::order::Model {
    let fields = fields.clone();
    entities::order::Model {
        id,
        client_id: fields.client_id,
        template_id: fields.template_id,
        description: fields.description,
        status: fields.status,
        created_at: Utc::now(),
        city: fields.city,
        street: fields.street,
        plot: fields.plot,
        grave_type: fields.grave_type,
        grave_size: fields.grave_size,
        border_material_id: fields.border_material_id,
        frame_material_id: fields.frame_material_id,
        main_plate_material_id: fields.main_plate_material_id,
        lamp: fields.lamp,
        lamp_price: fields.lamp_price,
        vase: fields.vase,
        vase_price: fields.vase_price,
        ball: fields.ball,
        ball_price: fields.ball_price,
        other_accessories: fields.other_accessories,
        other_accessories_price: fields.other_accessories_price,
        inscription: fields.inscription,
        letter_color: fields.letter_color,
        font: fields.font,
        inscription_image: fields.inscription_image,
        covering: fields.covering,
        covering_material_id: fields.covering_material_id,
        covering_quantity: fields.covering_quantity,
        curbs_quantity: fields.curbs_quantity,
        monument_cost: fields.monument_cost,
        old_monument_removal: fields.old_monument_removal,
        cemetery_fee: fields.cemetery_fee,
        transport_cost: fields.transport_cost,
        other_costs: fields.other_costs,
        other_costs_price: fields.other_costs_price,
        completion_date: fields.completion_date,
        advance_payment: fields.advance_payment,
        payment_method: fields.payment_method,
        total_cost: None,
    }
}
