//! Payment business logic - Recording money received for orders.
//!
//! A payment always belongs to one order and is made by that order's client.
//! Payments never touch the order row: the remaining balance is computed on
//! read by `core::cost`, so a new payment is reflected immediately.

use crate::{
    entities::{Order, Payment, PaymentMethod, payment},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Records a payment for an order.
///
/// # Errors
/// Returns an error if:
/// - The amount is zero or negative
/// - The order does not exist
/// - `client_id` is not the order's client
#[instrument(skip(db))]
pub async fn create_payment(
    db: &DatabaseConnection,
    order_id: i64,
    client_id: i64,
    amount: Decimal,
    date: NaiveDate,
    method: PaymentMethod,
) -> Result<payment::Model> {
    validate_amount(amount)?;

    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    if order.client_id != client_id {
        return Err(Error::Validation {
            message: format!("Order {order_id} does not belong to client {client_id}"),
        });
    }

    let model = payment::ActiveModel {
        order_id: Set(order_id),
        client_id: Set(client_id),
        amount: Set(amount),
        date: Set(date),
        method: Set(method),
        ..Default::default()
    };
    let payment = model.insert(db).await?;

    info!(payment_id = payment.id, order_id, %amount, "Payment recorded");
    Ok(payment)
}

/// Retrieves a payment by its unique ID.
pub async fn get_payment_by_id(
    db: &DatabaseConnection,
    payment_id: i64,
) -> Result<Option<payment::Model>> {
    Payment::find_by_id(payment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every payment, most recent date first.
pub async fn get_all_payments(db: &DatabaseConnection) -> Result<Vec<payment::Model>> {
    Payment::find()
        .order_by_desc(payment::Column::Date)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the payments for one order in the order they were made.
pub async fn get_payments_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::OrderId.eq(order_id))
        .order_by_asc(payment::Column::Date)
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the payments received on one day.
pub async fn get_payments_on_date(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::Date.eq(date))
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Corrects the amount, date or method of a payment.
pub async fn update_payment(
    db: &DatabaseConnection,
    payment_id: i64,
    amount: Decimal,
    date: NaiveDate,
    method: PaymentMethod,
) -> Result<payment::Model> {
    validate_amount(amount)?;

    let mut payment: payment::ActiveModel = Payment::find_by_id(payment_id)
        .one(db)
        .await?
        .ok_or(Error::PaymentNotFound { id: payment_id })?
        .into();

    payment.amount = Set(amount);
    payment.date = Set(date);
    payment.method = Set(method);
    payment.update(db).await.map_err(Into::into)
}

/// Deletes a payment.
pub async fn delete_payment(db: &DatabaseConnection, payment_id: i64) -> Result<()> {
    let result = Payment::delete_by_id(payment_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::PaymentNotFound { id: payment_id });
    }
    Ok(())
}
