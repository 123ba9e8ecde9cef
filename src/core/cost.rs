//! Order cost engine.
//!
//! Pure functions that turn an order's priced fields, its payments and its
//! tasks into the numbers operators care about: total cost, amount paid,
//! amount still due and progress. All money is `Decimal`; an absent price is
//! worth zero and never an error.
//!
//! `calculate_total_cost` is what the order write path stores in
//! `orders.total_cost`. The other functions read the stored value.

use crate::{
    core::order::OrderFields,
    entities::{Material, Order, Payment, Task, material, order, payment, task},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;

/// Flat surcharge added to every covering on top of material × area.
pub const COVERING_SURCHARGE: i64 = 70;

/// Cost of the covering: material price × m² plus [`COVERING_SURCHARGE`].
///
/// Zero unless covering is selected, a covering material is set and resolved,
/// and a quantity is given.
#[must_use]
pub fn covering_cost(fields: &OrderFields, covering_material: Option<&material::Model>) -> Decimal {
    match (
        fields.covering,
        fields.covering_material_id,
        covering_material,
        fields.covering_quantity,
    ) {
        (true, Some(_), Some(material), Some(quantity)) => {
            material.price * quantity + Decimal::from(COVERING_SURCHARGE)
        }
        _ => Decimal::ZERO,
    }
}

/// Sums every priced component of an order.
///
/// Lamp, vase and ball count only when their flag is set and a price is
/// present. The covering counts as described in [`covering_cost`]. Other
/// accessories and the flat costs (monument, old monument removal, cemetery
/// fee, transport, other costs) count whenever a price is present.
#[must_use]
pub fn calculate_total_cost(
    fields: &OrderFields,
    covering_material: Option<&material::Model>,
) -> Decimal {
    let flagged = [
        (fields.lamp, fields.lamp_price),
        (fields.vase, fields.vase_price),
        (fields.ball, fields.ball_price),
    ];
    let accessories: Decimal = flagged
        .iter()
        .filter_map(|&(selected, price)| if selected { price } else { None })
        .sum();

    let flat_costs: Decimal = [
        fields.other_accessories_price,
        fields.monument_cost,
        fields.old_monument_removal,
        fields.cemetery_fee,
        fields.transport_cost,
        fields.other_costs_price,
    ]
    .into_iter()
    .flatten()
    .sum();

    accessories + covering_cost(fields, covering_material) + flat_costs
}

/// Advance payment plus every payment recorded for the order.
///
/// `payments` should be the payments whose `order_id` is this order; all of
/// them are counted, duplicates included.
#[must_use]
pub fn calculate_total_paid(order: &order::Model, payments: &[payment::Model]) -> Decimal {
    let advance = order.advance_payment.unwrap_or(Decimal::ZERO);
    advance + payments.iter().map(|p| p.amount).sum::<Decimal>()
}

/// Stored total cost minus everything paid so far.
///
/// Negative when the client has overpaid.
#[must_use]
pub fn calculate_remaining_payment(order: &order::Model, payments: &[payment::Model]) -> Decimal {
    order.total_cost.unwrap_or(Decimal::ZERO) - calculate_total_paid(order, payments)
}

/// Percentage of completed tasks, truncated. An order without tasks is at 0%.
#[must_use]
pub fn progress(tasks: &[task::Model]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    // completed <= len, so the quotient is at most 100
    u8::try_from(completed * 100 / tasks.len()).unwrap_or(100)
}

/// Everything the cost engine knows about one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCostSummary {
    /// Order id
    pub order_id: i64,
    /// Stored total cost (zero if never computed)
    pub total_cost: Decimal,
    /// Cost of the covering alone
    pub covering_cost: Decimal,
    /// Advance plus payments
    pub total_paid: Decimal,
    /// Total cost minus total paid, may be negative
    pub remaining: Decimal,
    /// Completed tasks in percent
    pub progress: u8,
}

/// Loads an order with its covering material, payments and tasks and runs
/// the cost engine over them.
pub async fn order_cost_summary(db: &DatabaseConnection, order_id: i64) -> Result<OrderCostSummary> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let covering_material = match order.covering_material_id {
        Some(material_id) => Material::find_by_id(material_id).one(db).await?,
        None => None,
    };

    let payments = Payment::find()
        .filter(payment::Column::OrderId.eq(order_id))
        .all(db)
        .await?;

    let tasks = Task::find()
        .filter(task::Column::OrderId.eq(order_id))
        .order_by_asc(task::Column::Id)
        .all(db)
        .await?;

    let fields = OrderFields::from(&order);
    Ok(OrderCostSummary {
        order_id,
        total_cost: order.total_cost.unwrap_or(Decimal::ZERO),
        covering_cost: covering_cost(&fields, covering_material.as_ref()),
        total_paid: calculate_total_paid(&order, &payments),
        remaining: calculate_remaining_payment(&order, &payments),
        progress: progress(&tasks),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{OrderStatus, PaymentMethod};
    use crate::test_utils::*;
    use chrono::{NaiveDate, Utc};

    fn material(price: Decimal) -> material::Model {
        material::Model {
            id: 1,
            name: "Granit".to_string(),
            price,
        }
    }

    fn stored_order(total_cost: Option<Decimal>, advance: Option<Decimal>) -> order::Model {
        let fields = OrderFields {
            client_id: 1,
            template_id: 1,
            advance_payment: advance,
            ..OrderFields::default()
        };
        let mut order = order_model_from_fields(1, &fields);
        order.total_cost = total_cost;
        order
    }

    fn payment(id: i64, amount: Decimal) -> payment::Model {
        payment::Model {
            id,
            order_id: 1,
            client_id: 1,
            amount,
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            method: PaymentMethod::Cash,
        }
    }

    fn tasks(total: usize, completed: usize) -> Vec<task::Model> {
        (0..total)
            .map(|i| task::Model {
                id: i64::try_from(i).unwrap() + 1,
                order_id: Some(1),
                order_template_id: None,
                name: format!("Zadanie {i}"),
                description: task::DEFAULT_DESCRIPTION.to_string(),
                assigned_to: None,
                completed: i < completed,
                created_at: Utc::now(),
                image: None,
            })
            .collect()
    }

    #[test]
    fn test_total_cost_no_priced_features() {
        let fields = OrderFields::default();
        assert_eq!(calculate_total_cost(&fields, None), Decimal::ZERO);
    }

    #[test]
    fn test_flag_without_price_contributes_zero() {
        let fields = OrderFields {
            lamp: true,
            vase: true,
            ball: true,
            covering: true,
            ..OrderFields::default()
        };
        assert_eq!(calculate_total_cost(&fields, None), Decimal::ZERO);
    }

    #[test]
    fn test_price_without_flag_is_ignored() {
        let fields = OrderFields {
            lamp: false,
            lamp_price: Some(Decimal::new(15000, 2)),
            vase: false,
            vase_price: Some(Decimal::from(80)),
            ..OrderFields::default()
        };
        assert_eq!(calculate_total_cost(&fields, None), Decimal::ZERO);
    }

    #[test]
    fn test_covering_contributes_price_times_quantity_plus_surcharge() {
        let fields = OrderFields {
            covering: true,
            covering_material_id: Some(1),
            covering_quantity: Some(Decimal::from(2)),
            ..OrderFields::default()
        };
        let granite = material(Decimal::from(100));
        assert_eq!(covering_cost(&fields, Some(&granite)), Decimal::from(270));
        assert_eq!(
            calculate_total_cost(&fields, Some(&granite)),
            Decimal::from(270)
        );
    }

    #[test]
    fn test_covering_requires_flag_material_and_quantity() {
        let granite = material(Decimal::from(100));
        let complete = OrderFields {
            covering: true,
            covering_material_id: Some(1),
            covering_quantity: Some(Decimal::from(2)),
            ..OrderFields::default()
        };

        let no_flag = OrderFields {
            covering: false,
            ..complete.clone()
        };
        assert_eq!(covering_cost(&no_flag, Some(&granite)), Decimal::ZERO);

        let no_quantity = OrderFields {
            covering_quantity: None,
            ..complete.clone()
        };
        assert_eq!(covering_cost(&no_quantity, Some(&granite)), Decimal::ZERO);

        let no_material = OrderFields {
            covering_material_id: None,
            ..complete.clone()
        };
        assert_eq!(covering_cost(&no_material, Some(&granite)), Decimal::ZERO);

        // Material id set but the row could not be resolved
        assert_eq!(covering_cost(&complete, None), Decimal::ZERO);
    }

    #[test]
    fn test_covering_fractional_area_is_exact() {
        let fields = OrderFields {
            covering: true,
            covering_material_id: Some(1),
            covering_quantity: Some(Decimal::new(275, 2)), // 2.75 m²
            ..OrderFields::default()
        };
        let marble = material(Decimal::new(33333, 2)); // 333.33
        // 333.33 * 2.75 = 916.6575, + 70
        assert_eq!(
            covering_cost(&fields, Some(&marble)),
            Decimal::new(9_866_575, 4)
        );
    }

    #[test]
    fn test_total_cost_sums_everything() {
        let fields = OrderFields {
            lamp: true,
            lamp_price: Some(Decimal::new(12050, 2)),
            vase: true,
            vase_price: Some(Decimal::from(90)),
            ball: true,
            ball_price: Some(Decimal::new(4999, 2)),
            covering: true,
            covering_material_id: Some(1),
            covering_quantity: Some(Decimal::from(3)),
            other_accessories_price: Some(Decimal::from(25)),
            monument_cost: Some(Decimal::from(5000)),
            old_monument_removal: Some(Decimal::from(400)),
            cemetery_fee: Some(Decimal::new(15010, 2)),
            transport_cost: Some(Decimal::from(200)),
            other_costs_price: Some(Decimal::new(1, 2)),
            ..OrderFields::default()
        };
        let granite = material(Decimal::from(450));

        // 120.50 + 90 + 49.99 + (450*3 + 70) + 25 + 5000 + 400 + 150.10 + 200 + 0.01
        assert_eq!(
            calculate_total_cost(&fields, Some(&granite)),
            Decimal::new(745_560, 2)
        );
    }

    #[test]
    fn test_total_cost_only_flat_costs() {
        let fields = OrderFields {
            monument_cost: Some(Decimal::from(3000)),
            transport_cost: Some(Decimal::from(150)),
            ..OrderFields::default()
        };
        assert_eq!(calculate_total_cost(&fields, None), Decimal::from(3150));
    }

    #[test]
    fn test_total_cost_independent_of_which_fields_are_set() {
        let a = OrderFields {
            lamp: true,
            lamp_price: Some(Decimal::from(100)),
            cemetery_fee: Some(Decimal::from(50)),
            ..OrderFields::default()
        };
        let b = OrderFields {
            vase: true,
            vase_price: Some(Decimal::from(50)),
            transport_cost: Some(Decimal::from(100)),
            ..OrderFields::default()
        };
        assert_eq!(
            calculate_total_cost(&a, None),
            calculate_total_cost(&b, None)
        );
    }

    #[test]
    fn test_total_paid_advance_and_payments() {
        let order = stored_order(Some(Decimal::from(1000)), Some(Decimal::from(200)));
        let payments = vec![
            payment(1, Decimal::from(300)),
            payment(2, Decimal::new(5050, 2)),
        ];
        assert_eq!(
            calculate_total_paid(&order, &payments),
            Decimal::new(55050, 2)
        );
    }

    #[test]
    fn test_total_paid_counts_duplicates() {
        let order = stored_order(None, None);
        let payments = vec![payment(1, Decimal::from(100)), payment(2, Decimal::from(100))];
        assert_eq!(calculate_total_paid(&order, &payments), Decimal::from(200));
    }

    #[test]
    fn test_total_paid_nothing_paid() {
        let order = stored_order(Some(Decimal::from(1000)), None);
        assert_eq!(calculate_total_paid(&order, &[]), Decimal::ZERO);
    }

    #[test]
    fn test_remaining_payment() {
        let order = stored_order(Some(Decimal::from(1000)), Some(Decimal::from(200)));
        let payments = vec![payment(1, Decimal::from(300))];
        assert_eq!(
            calculate_remaining_payment(&order, &payments),
            Decimal::from(500)
        );
    }

    #[test]
    fn test_remaining_payment_overpaid_is_negative() {
        let order = stored_order(Some(Decimal::from(500)), Some(Decimal::from(400)));
        let payments = vec![payment(1, Decimal::from(300))];
        assert_eq!(
            calculate_remaining_payment(&order, &payments),
            Decimal::from(-200)
        );
    }

    #[test]
    fn test_remaining_payment_without_total_cost() {
        let order = stored_order(None, Some(Decimal::from(100)));
        assert_eq!(
            calculate_remaining_payment(&order, &[]),
            Decimal::from(-100)
        );
    }

    #[test]
    fn test_progress_truncates() {
        assert_eq!(progress(&tasks(4, 1)), 25);
        assert_eq!(progress(&tasks(3, 1)), 33);
        assert_eq!(progress(&tasks(3, 2)), 66);
        assert_eq!(progress(&tasks(12, 11)), 91);
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(progress(&[]), 0);
        assert_eq!(progress(&tasks(5, 0)), 0);
        assert_eq!(progress(&tasks(5, 5)), 100);
    }

    #[tokio::test]
    async fn test_order_cost_summary_integration() -> Result<()> {
        let (db, order) = setup_with_order().await?;

        crate::core::payment::create_payment(
            &db,
            order.id,
            order.client_id,
            Decimal::from(300),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            PaymentMethod::Transfer,
        )
        .await?;

        let tasks = crate::core::task::get_tasks_for_order(&db, order.id).await?;
        crate::core::task::set_task_completed(&db, tasks[0].id, true).await?;
        crate::core::task::set_task_completed(&db, tasks[1].id, true).await?;
        crate::core::task::set_task_completed(&db, tasks[2].id, true).await?;

        let summary = order_cost_summary(&db, order.id).await?;
        assert_eq!(summary.order_id, order.id);
        assert_eq!(summary.total_cost, Decimal::from(5270));
        assert_eq!(summary.covering_cost, Decimal::from(270));
        assert_eq!(summary.total_paid, Decimal::from(800));
        assert_eq!(summary.remaining, Decimal::from(4470));
        // 3 of 12 monument tasks
        assert_eq!(summary.progress, 25);

        let reloaded = crate::core::order::get_order_by_id(&db, order.id)
            .await?
            .unwrap();
        assert_eq!(reloaded.status, OrderStatus::Quote);

        Ok(())
    }

    #[tokio::test]
    async fn test_order_cost_summary_missing_order() -> Result<()> {
        let db = setup_test_db().await?;
        let result = order_cost_summary(&db, 999).await;
        assert!(matches!(result, Err(Error::OrderNotFound { id: 999 })));
        Ok(())
    }
}
