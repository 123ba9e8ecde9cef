//! Material business logic - The price list of stone and other materials.
//!
//! A material's price feeds the covering cost of every order that uses it as
//! covering material. Changing a price does not rewrite stored order totals;
//! they pick up the new price the next time the order is saved.

use crate::{
    config::catalog::MaterialConfig,
    entities::{Material, material},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

fn validate_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

/// Creates a new material.
///
/// # Errors
/// Returns an error if the name is empty or the price is negative.
#[instrument(skip(db))]
pub async fn create_material(
    db: &DatabaseConnection,
    name: String,
    price: Decimal,
) -> Result<material::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Material name cannot be empty".to_string(),
        });
    }
    validate_price(price)?;

    let model = material::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a material by its unique ID.
pub async fn get_material_by_id(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Option<material::Model>> {
    Material::find_by_id(material_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the full price list sorted by name.
pub async fn get_all_materials(db: &DatabaseConnection) -> Result<Vec<material::Model>> {
    Material::find()
        .order_by_asc(material::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sets a new unit price for a material.
#[instrument(skip(db))]
pub async fn update_material_price(
    db: &DatabaseConnection,
    material_id: i64,
    price: Decimal,
) -> Result<material::Model> {
    validate_price(price)?;

    let mut material: material::ActiveModel = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or(Error::MaterialNotFound { id: material_id })?
        .into();

    material.price = Set(price);
    let updated = material.update(db).await?;
    info!(material_id, %price, "Material price updated");
    Ok(updated)
}

/// Inserts the configured materials that are not in the database yet.
///
/// Materials are matched by name; existing rows keep their current price.
/// Returns how many materials were inserted.
pub async fn seed_materials(db: &DatabaseConnection, materials: &[MaterialConfig]) -> Result<usize> {
    let mut inserted = 0;

    for config in materials {
        let exists = Material::find()
            .filter(material::Column::Name.eq(config.name.trim()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        create_material(db, config.name.clone(), config.price).await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!(inserted, "Seeded materials from config");
    }
    Ok(inserted)
}
