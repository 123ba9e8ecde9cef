//! Daily report generation.
//!
//! The report collects what happened on one day (new orders, payments
//! received) and where every unfinished order stands financially. It is
//! returned as structured, serializable data; [`format_daily_report`] renders
//! it as plain text and the PDF renderer consumes the serialized form.

use crate::{
    core::cost::{calculate_remaining_payment, calculate_total_paid, progress},
    entities::{Client, Order, OrderStatus, Payment, Task, order, payment, task},
    errors::Result,
};
use chrono::{Duration, NaiveDate, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{Iterable, PaginatorTrait, QueryOrder, prelude::*};
use serde::Serialize;
use std::collections::HashMap;

/// Financial position and progress of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBalance {
    /// Order id
    pub order_id: i64,
    /// "First Last" of the client
    pub client_name: String,
    /// Current status
    pub status: OrderStatus,
    /// Stored total cost, zero if never computed
    pub total_cost: Decimal,
    /// Advance plus payments
    pub total_paid: Decimal,
    /// Still to be paid, negative when overpaid
    pub remaining: Decimal,
    /// Completed tasks in percent
    pub progress: u8,
}

/// Everything shown on the daily report.
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    /// Day the report covers
    pub date: NaiveDate,
    /// Orders created that day (UTC), oldest first
    pub new_orders: Vec<order::Model>,
    /// Payments dated that day
    pub payments: Vec<payment::Model>,
    /// Sum of `payments`
    pub payments_total: Decimal,
    /// Every order not yet completed
    pub open_orders: Vec<OrderBalance>,
    /// Sum of the positive remaining balances of open orders
    pub outstanding_total: Decimal,
    /// Number of orders in each status, in workflow order
    pub status_counts: Vec<(OrderStatus, u64)>,
}

/// Gathers the daily report for `date`.
pub async fn generate_daily_report(db: &DatabaseConnection, date: NaiveDate) -> Result<DailyReport> {
    let day_start = date.and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);

    let new_orders = Order::find()
        .filter(order::Column::CreatedAt.gte(day_start))
        .filter(order::Column::CreatedAt.lt(day_end))
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?;

    let payments = Payment::find()
        .filter(payment::Column::Date.eq(date))
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await?;
    let payments_total: Decimal = payments.iter().map(|p| p.amount).sum();

    let open_orders = open_order_balances(db).await?;
    let outstanding_total: Decimal = open_orders
        .iter()
        .map(|balance| balance.remaining.max(Decimal::ZERO))
        .sum();

    let mut status_counts = Vec::new();
    for status in OrderStatus::iter() {
        let count = Order::find()
            .filter(order::Column::Status.eq(status))
            .count(db)
            .await?;
        status_counts.push((status, count));
    }

    tracing::debug!(
        %date,
        new_orders = new_orders.len(),
        payments = payments.len(),
        open_orders = open_orders.len(),
        "Daily report generated"
    );

    Ok(DailyReport {
        date,
        new_orders,
        payments,
        payments_total,
        open_orders,
        outstanding_total,
        status_counts,
    })
}

/// Balances of every order that is not completed, oldest first.
async fn open_order_balances(db: &DatabaseConnection) -> Result<Vec<OrderBalance>> {
    let orders = Order::find()
        .filter(order::Column::Status.ne(OrderStatus::Completed))
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?;
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();

    let mut payments_by_order: HashMap<i64, Vec<payment::Model>> = HashMap::new();
    for payment in Payment::find()
        .filter(payment::Column::OrderId.is_in(order_ids.clone()))
        .all(db)
        .await?
    {
        payments_by_order
            .entry(payment.order_id)
            .or_default()
            .push(payment);
    }

    let mut tasks_by_order: HashMap<i64, Vec<task::Model>> = HashMap::new();
    for task in Task::find()
        .filter(task::Column::OrderId.is_in(order_ids))
        .all(db)
        .await?
    {
        if let Some(order_id) = task.order_id {
            tasks_by_order.entry(order_id).or_default().push(task);
        }
    }

    let client_names: HashMap<i64, String> = Client::find()
        .all(db)
        .await?
        .into_iter()
        .map(|client| (client.id, client.full_name()))
        .collect();

    Ok(orders
        .iter()
        .map(|order| {
            let payments = payments_by_order
                .get(&order.id)
                .map_or(&[][..], Vec::as_slice);
            let tasks = tasks_by_order.get(&order.id).map_or(&[][..], Vec::as_slice);
            OrderBalance {
                order_id: order.id,
                client_name: client_names
                    .get(&order.client_id)
                    .cloned()
                    .unwrap_or_default(),
                status: order.status,
                total_cost: order.total_cost.unwrap_or(Decimal::ZERO),
                total_paid: calculate_total_paid(order, payments),
                remaining: calculate_remaining_payment(order, payments),
                progress: progress(tasks),
            }
        })
        .collect())
}

/// Formats an amount in złoty with two decimals, e.g. `1234.50 zł`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} zł")
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
///
/// # Arguments
/// * `percent` - Progress percentage, values above 100 are clamped
/// * `bar_length` - Length of the progress bar in characters (default 10)
#[must_use]
pub fn format_progress_bar(percent: u8, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = usize::from(percent.min(100));

    // Round half up to the nearest cell
    let filled = (clamped * length + 50) / 100;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {clamped}%")
}

/// Renders the report as plain text.
#[must_use]
pub fn format_daily_report(report: &DailyReport) -> String {
    let mut lines = vec![
        format!("Raport dzienny {}", report.date.format("%d.%m.%Y")),
        String::new(),
        format!("Nowe zlecenia: {}", report.new_orders.len()),
    ];
    lines.extend(report.new_orders.iter().map(|order| {
        format!(
            "  #{} {}, {} {} | {}",
            order.id,
            order.city,
            order.street,
            order.plot,
            format_money(order.total_cost.unwrap_or(Decimal::ZERO))
        )
    }));
    lines.push(String::new());

    lines.push(format!(
        "Wpłaty: {} (razem {})",
        report.payments.len(),
        format_money(report.payments_total)
    ));
    lines.extend(report.payments.iter().map(|payment| {
        format!(
            "  zlecenie #{} | {} | {}",
            payment.order_id,
            format_money(payment.amount),
            payment.method.display_name()
        )
    }));
    lines.push(String::new());

    lines.push(format!(
        "Otwarte zlecenia: {} (do zapłaty {})",
        report.open_orders.len(),
        format_money(report.outstanding_total)
    ));
    lines.extend(report.open_orders.iter().map(|balance| {
        format!(
            "  #{} {} | {} | koszt {} | wpłacono {} | pozostało {} | {}",
            balance.order_id,
            balance.client_name,
            balance.status.display_name(),
            format_money(balance.total_cost),
            format_money(balance.total_paid),
            format_money(balance.remaining),
            format_progress_bar(balance.progress, None)
        )
    }));
    lines.push(String::new());

    lines.push("Zlecenia wg statusu:".to_string());
    lines.extend(
        report
            .status_counts
            .iter()
            .map(|(status, count)| format!("  {}: {count}", status.display_name())),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
