//! Client business logic - Registering and maintaining the people who
//! commission work.
//!
//! PESEL is the natural key of a client and is checked for shape and
//! uniqueness before anything is written.

use crate::{
    core::order::delete_order_rows,
    entities::{Client, Order, Payment, client, order, payment},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Length of a PESEL number.
pub const PESEL_LENGTH: usize = 11;

/// Editable client data, as entered on the client form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetails {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Primary phone number
    pub phone: String,
    /// Secondary phone number
    pub alternative_phone: Option<String>,
    /// Contact email
    pub email: String,
    /// Postal address
    pub mailing_address: String,
    /// 11-digit national identification number
    pub pesel: String,
}

impl ClientDetails {
    fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Client first and last name are required".to_string(),
            });
        }
        if !is_valid_pesel(&self.pesel) {
            return Err(Error::Validation {
                message: format!("PESEL must be exactly {PESEL_LENGTH} digits"),
            });
        }
        Ok(())
    }

    fn write_into(&self, model: &mut client::ActiveModel) {
        model.first_name = Set(self.first_name.trim().to_string());
        model.last_name = Set(self.last_name.trim().to_string());
        model.phone = Set(self.phone.trim().to_string());
        model.alternative_phone = Set(self
            .alternative_phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .map(ToString::to_string));
        model.email = Set(self.email.trim().to_string());
        model.mailing_address = Set(self.mailing_address.trim().to_string());
        model.pesel = Set(self.pesel.trim().to_string());
    }
}

/// Whether `pesel` has the shape of a PESEL number: 11 ASCII digits.
///
/// The checksum digit is not verified.
#[must_use]
pub fn is_valid_pesel(pesel: &str) -> bool {
    let pesel = pesel.trim();
    pesel.len() == PESEL_LENGTH && pesel.bytes().all(|b| b.is_ascii_digit())
}

/// Fails with [`Error::DuplicatePesel`] if another client already uses `pesel`.
async fn ensure_pesel_free(db: &DatabaseConnection, pesel: &str, except: Option<i64>) -> Result<()> {
    let mut query = Client::find().filter(client::Column::Pesel.eq(pesel.trim()));
    if let Some(id) = except {
        query = query.filter(client::Column::Id.ne(id));
    }
    if query.one(db).await?.is_some() {
        return Err(Error::DuplicatePesel {
            pesel: pesel.trim().to_string(),
        });
    }
    Ok(())
}

/// Registers a new client.
///
/// # Errors
/// Returns an error if:
/// - First or last name is empty
/// - The PESEL is not 11 digits
/// - Another client already has this PESEL
#[instrument(skip(db, details), fields(last_name = %details.last_name))]
pub async fn create_client(db: &DatabaseConnection, details: ClientDetails) -> Result<client::Model> {
    details.validate()?;
    ensure_pesel_free(db, &details.pesel, None).await?;

    let mut model = client::ActiveModel {
        ..Default::default()
    };
    details.write_into(&mut model);
    let client = model.insert(db).await?;

    info!(client_id = client.id, "Client created");
    Ok(client)
}

/// Retrieves a client by its unique ID.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Option<client::Model>> {
    Client::find_by_id(client_id).one(db).await.map_err(Into::into)
}

/// Retrieves all clients sorted by last name, then first name.
pub async fn get_all_clients(db: &DatabaseConnection) -> Result<Vec<client::Model>> {
    Client::find()
        .order_by_asc(client::Column::LastName)
        .order_by_asc(client::Column::FirstName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replaces a client's details.
pub async fn update_client(
    db: &DatabaseConnection,
    client_id: i64,
    details: ClientDetails,
) -> Result<client::Model> {
    details.validate()?;

    let existing = Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::ClientNotFound { id: client_id })?;
    ensure_pesel_free(db, &details.pesel, Some(client_id)).await?;

    let mut model: client::ActiveModel = existing.into();
    details.write_into(&mut model);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a client together with all their orders and payments.
#[instrument(skip(db))]
pub async fn delete_client(db: &DatabaseConnection, client_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    Client::find_by_id(client_id)
        .one(&txn)
        .await?
        .ok_or(Error::ClientNotFound { id: client_id })?;

    let orders = Order::find()
        .filter(order::Column::ClientId.eq(client_id))
        .all(&txn)
        .await?;
    for order in &orders {
        delete_order_rows(&txn, order.id).await?;
    }

    Payment::delete_many()
        .filter(payment::Column::ClientId.eq(client_id))
        .exec(&txn)
        .await?;
    Client::delete_by_id(client_id).exec(&txn).await?;

    txn.commit().await?;
    info!(client_id, orders = orders.len(), "Client deleted");
    Ok(())
}
