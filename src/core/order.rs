//! Order business logic - Creating, editing and removing orders.
//!
//! Every write of an order goes through `save_order`, which recomputes
//! `total_cost` with [`calculate_total_cost`] inside the same database
//! transaction as the write. Creating an order also expands its template into
//! the default task list, once; later edits never touch the tasks.

use crate::{
    core::{cost::calculate_total_cost, task::create_default_tasks},
    entities::{
        Client, GraveSize, GraveType, Material, Order, OrderStatus, OrderTemplate, PaymentMethod,
        Payment, Photo, Task, material, order, payment, photo, task,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// The editable state of an order, everything an operator fills in on the
/// order form. `total_cost` is absent: it is always derived.
///
/// Field meanings match [`order::Model`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFields {
    pub client_id: i64,
    pub template_id: i64,
    pub description: Option<String>,
    pub status: OrderStatus,
    pub city: String,
    pub street: String,
    pub plot: String,
    pub grave_type: GraveType,
    pub grave_size: GraveSize,
    pub border_material_id: Option<i64>,
    pub frame_material_id: Option<i64>,
    pub main_plate_material_id: Option<i64>,
    pub lamp: bool,
    pub lamp_price: Option<Decimal>,
    pub vase: bool,
    pub vase_price: Option<Decimal>,
    pub ball: bool,
    pub ball_price: Option<Decimal>,
    pub other_accessories: Option<String>,
    pub other_accessories_price: Option<Decimal>,
    pub inscription: Option<String>,
    pub letter_color: Option<String>,
    pub font: Option<String>,
    pub inscription_image: Option<String>,
    pub covering: bool,
    pub covering_material_id: Option<i64>,
    pub covering_quantity: Option<Decimal>,
    pub curbs_quantity: Option<Decimal>,
    pub monument_cost: Option<Decimal>,
    pub old_monument_removal: Option<Decimal>,
    pub cemetery_fee: Option<Decimal>,
    pub transport_cost: Option<Decimal>,
    pub other_costs: Option<String>,
    pub other_costs_price: Option<Decimal>,
    pub completion_date: Option<Date>,
    pub advance_payment: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
}

impl From<&order::Model> for OrderFields {
    fn from(order: &order::Model) -> Self {
        Self {
            client_id: order.client_id,
            template_id: order.template_id,
            description: order.description.clone(),
            status: order.status,
            city: order.city.clone(),
            street: order.street.clone(),
            plot: order.plot.clone(),
            grave_type: order.grave_type,
            grave_size: order.grave_size,
            border_material_id: order.border_material_id,
            frame_material_id: order.frame_material_id,
            main_plate_material_id: order.main_plate_material_id,
            lamp: order.lamp,
            lamp_price: order.lamp_price,
            vase: order.vase,
            vase_price: order.vase_price,
            ball: order.ball,
            ball_price: order.ball_price,
            other_accessories: order.other_accessories.clone(),
            other_accessories_price: order.other_accessories_price,
            inscription: order.inscription.clone(),
            letter_color: order.letter_color.clone(),
            font: order.font.clone(),
            inscription_image: order.inscription_image.clone(),
            covering: order.covering,
            covering_material_id: order.covering_material_id,
            covering_quantity: order.covering_quantity,
            curbs_quantity: order.curbs_quantity,
            monument_cost: order.monument_cost,
            old_monument_removal: order.old_monument_removal,
            cemetery_fee: order.cemetery_fee,
            transport_cost: order.transport_cost,
            other_costs: order.other_costs.clone(),
            other_costs_price: order.other_costs_price,
            completion_date: order.completion_date,
            advance_payment: order.advance_payment,
            payment_method: order.payment_method,
        }
    }
}

impl OrderFields {
    fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("City", &self.city),
            ("Street", &self.street),
            ("Plot", &self.plot),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation {
                    message: format!("{label} cannot be empty"),
                });
            }
        }
        Ok(())
    }

    /// Copies every editable field onto `model` and stores `total_cost`.
    fn write_into(&self, model: &mut order::ActiveModel, total_cost: Decimal) {
        model.client_id = Set(self.client_id);
        model.template_id = Set(self.template_id);
        model.description = Set(self.description.clone());
        model.status = Set(self.status);
        model.city = Set(self.city.trim().to_string());
        model.street = Set(self.street.trim().to_string());
        model.plot = Set(self.plot.trim().to_string());
        model.grave_type = Set(self.grave_type);
        model.grave_size = Set(self.grave_size);
        model.border_material_id = Set(self.border_material_id);
        model.frame_material_id = Set(self.frame_material_id);
        model.main_plate_material_id = Set(self.main_plate_material_id);
        model.lamp = Set(self.lamp);
        model.lamp_price = Set(self.lamp_price);
        model.vase = Set(self.vase);
        model.vase_price = Set(self.vase_price);
        model.ball = Set(self.ball);
        model.ball_price = Set(self.ball_price);
        model.other_accessories = Set(self.other_accessories.clone());
        model.other_accessories_price = Set(self.other_accessories_price);
        model.inscription = Set(self.inscription.clone());
        model.letter_color = Set(self.letter_color.clone());
        model.font = Set(self.font.clone());
        model.inscription_image = Set(self
            .inscription_image
            .as_ref()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty()));
        model.covering = Set(self.covering);
        model.covering_material_id = Set(self.covering_material_id);
        model.covering_quantity = Set(self.covering_quantity);
        model.curbs_quantity = Set(self.curbs_quantity);
        model.monument_cost = Set(self.monument_cost);
        model.old_monument_removal = Set(self.old_monument_removal);
        model.cemetery_fee = Set(self.cemetery_fee);
        model.transport_cost = Set(self.transport_cost);
        model.other_costs = Set(self.other_costs.clone());
        model.other_costs_price = Set(self.other_costs_price);
        model.completion_date = Set(self.completion_date);
        model.advance_payment = Set(self.advance_payment);
        model.payment_method = Set(self.payment_method);
        model.total_cost = Set(Some(total_cost));
    }
}

/// Loads the covering material referenced by `fields`, if any.
async fn load_covering_material<C>(conn: &C, fields: &OrderFields) -> Result<Option<material::Model>>
where
    C: ConnectionTrait,
{
    match fields.covering_material_id {
        Some(material_id) => Ok(Material::find_by_id(material_id).one(conn).await?),
        None => Ok(None),
    }
}

/// Recomputes `total_cost` from `fields` and writes the order.
///
/// `existing` is `None` for a new order. Orders are inserted and updated
/// only here.
async fn save_order<C>(
    conn: &C,
    existing: Option<order::Model>,
    fields: &OrderFields,
) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    let covering_material = load_covering_material(conn, fields).await?;
    let total_cost = calculate_total_cost(fields, covering_material.as_ref());

    let saved = match existing {
        Some(existing) => {
            let mut model: order::ActiveModel = existing.into();
            fields.write_into(&mut model, total_cost);
            model.update(conn).await?
        }
        None => {
            let mut model = order::ActiveModel {
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            fields.write_into(&mut model, total_cost);
            model.insert(conn).await?
        }
    };

    tracing::debug!(order_id = saved.id, %total_cost, "Order saved");
    Ok(saved)
}

/// Creates an order and its default tasks in one transaction.
///
/// The client and template must exist. The template's default task list is
/// copied onto the order in workflow order; nothing else ever generates
/// tasks for it again.
#[instrument(skip(db, fields))]
pub async fn create_order(db: &DatabaseConnection, fields: OrderFields) -> Result<order::Model> {
    fields.validate()?;

    let txn = db.begin().await?;

    Client::find_by_id(fields.client_id)
        .one(&txn)
        .await?
        .ok_or(Error::ClientNotFound {
            id: fields.client_id,
        })?;

    let template = OrderTemplate::find_by_id(fields.template_id)
        .one(&txn)
        .await?
        .ok_or(Error::TemplateNotFound {
            id: fields.template_id,
        })?;

    let order = save_order(&txn, None, &fields).await?;
    let tasks = create_default_tasks(&txn, order.id, &template).await?;

    txn.commit().await?;

    info!(
        order_id = order.id,
        client_id = order.client_id,
        template = %template.kind.slug(),
        tasks = tasks.len(),
        "Order created"
    );
    Ok(order)
}

/// Replaces all editable fields of an order and recomputes its total.
///
/// Switching the template is allowed but the existing task list is kept
/// as it is.
#[instrument(skip(db, fields))]
pub async fn update_order(
    db: &DatabaseConnection,
    order_id: i64,
    fields: OrderFields,
) -> Result<order::Model> {
    fields.validate()?;

    let txn = db.begin().await?;

    let existing = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    if existing.client_id != fields.client_id {
        Client::find_by_id(fields.client_id)
            .one(&txn)
            .await?
            .ok_or(Error::ClientNotFound {
                id: fields.client_id,
            })?;

        // Payments carry the client too and must keep matching the order.
        let payments = Payment::find()
            .filter(payment::Column::OrderId.eq(order_id))
            .count(&txn)
            .await?;
        if payments > 0 {
            return Err(Error::Validation {
                message: format!(
                    "Order {order_id} has {payments} payment(s); its client cannot change"
                ),
            });
        }
    }

    if existing.template_id != fields.template_id {
        OrderTemplate::find_by_id(fields.template_id)
            .one(&txn)
            .await?
            .ok_or(Error::TemplateNotFound {
                id: fields.template_id,
            })?;
    }

    let order = save_order(&txn, Some(existing), &fields).await?;
    txn.commit().await?;
    Ok(order)
}

/// Sets the status of an order. Any status may follow any other.
#[instrument(skip(db))]
pub async fn set_order_status(
    db: &DatabaseConnection,
    order_id: i64,
    status: OrderStatus,
) -> Result<order::Model> {
    let txn = db.begin().await?;

    let existing = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let mut fields = OrderFields::from(&existing);
    fields.status = status;

    let order = save_order(&txn, Some(existing), &fields).await?;
    txn.commit().await?;
    Ok(order)
}

/// Finds an order by its unique ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id).one(db).await.map_err(Into::into)
}

/// Retrieves all orders, newest first.
pub async fn get_all_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    Order::find()
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves orders in the given status, newest first.
pub async fn get_orders_by_status(
    db: &DatabaseConnection,
    status: OrderStatus,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::Status.eq(status))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Orders waiting for the client to pay.
pub async fn get_orders_awaiting_payment(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    get_orders_by_status(db, OrderStatus::AwaitingPayment).await
}

/// Finished orders.
pub async fn get_archived_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    get_orders_by_status(db, OrderStatus::Completed).await
}

/// Retrieves every order of one client, newest first.
pub async fn get_orders_for_client(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::ClientId.eq(client_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes an order's tasks, photos and payments, then the order itself.
pub(crate) async fn delete_order_rows<C>(conn: &C, order_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    Task::delete_many()
        .filter(task::Column::OrderId.eq(order_id))
        .exec(conn)
        .await?;
    Photo::delete_many()
        .filter(photo::Column::OrderId.eq(order_id))
        .exec(conn)
        .await?;
    Payment::delete_many()
        .filter(payment::Column::OrderId.eq(order_id))
        .exec(conn)
        .await?;

    let result = Order::delete_by_id(order_id).exec(conn).await?;
    Ok(result.rows_affected)
}

/// Deletes an order together with its tasks, photos and payments.
#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    if delete_order_rows(&txn, order_id).await? == 0 {
        return Err(Error::OrderNotFound { id: order_id });
    }

    txn.commit().await?;
    info!(order_id, "Order deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::templates::get_default_tasks;
    use crate::core::{payment as payment_ops, photo as photo_ops, task as task_ops};
    use crate::entities::{PaymentMethod, TemplateKind};
    use crate::test_utils::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_order_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let fields = OrderFields {
            client_id: 1,
            template_id: 1,
            city: "   ".to_string(),
            street: "Cmentarna".to_string(),
            plot: "B12".to_string(),
            ..OrderFields::default()
        };
        let result = create_order(&db, fields).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_client_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let template = create_test_template(&db, TemplateKind::Cladding).await?;

        let fields = OrderFields {
            client_id: 999,
            template_id: template.id,
            ..test_order_fields()
        };
        let result = create_order(&db, fields).await;
        assert!(matches!(result, Err(Error::ClientNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_template_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "90010112345").await?;

        let fields = OrderFields {
            client_id: client.id,
            template_id: 999,
            ..test_order_fields()
        };
        let result = create_order(&db, fields).await;
        assert!(matches!(result, Err(Error::TemplateNotFound { id: 999 })));

        // Nothing was written
        assert!(get_all_orders(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_computes_total_cost() -> Result<()> {
        let (_db, order) = setup_with_order().await?;

        // monument 5000 + covering 100 * 2 + 70
        assert_eq!(order.total_cost, Some(Decimal::from(5270)));
        assert_eq!(order.status, OrderStatus::Quote);
        assert_eq!(order.city, "Kraków");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_generates_template_tasks_in_order() -> Result<()> {
        let (db, order) = setup_with_order().await?;

        let tasks = task_ops::get_tasks_for_order(&db, order.id).await?;
        let expected = get_default_tasks(TemplateKind::MonumentInstallation);

        assert_eq!(tasks.len(), expected.len());
        for (task, definition) in tasks.iter().zip(expected) {
            assert_eq!(task.name, definition.name);
            assert_eq!(task.description, definition.description);
            assert_eq!(task.order_id, Some(order.id));
            assert_eq!(task.order_template_id, Some(order.template_id));
            assert!(!task.completed);
        }
        assert_eq!(tasks[0].name, "Zdjęcie miejsca przed");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_free_form_template_has_no_tasks() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "90010112345").await?;
        let template = create_test_template(&db, TemplateKind::NewTemplate).await?;

        let order = create_order(
            &db,
            OrderFields {
                client_id: client.id,
                template_id: template.id,
                ..test_order_fields()
            },
        )
        .await?;

        assert!(task_ops::get_tasks_for_order(&db, order.id).await?.is_empty());
        assert_eq!(order.total_cost, Some(Decimal::ZERO));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_recomputes_total_and_keeps_tasks() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        let tasks_before = task_ops::get_tasks_for_order(&db, order.id).await?;

        let mut fields = OrderFields::from(&order);
        fields.lamp = true;
        fields.lamp_price = Some(Decimal::new(19999, 2));
        fields.covering = false;

        let updated = update_order(&db, order.id, fields).await?;
        // 5000 + 199.99, covering switched off
        assert_eq!(updated.total_cost, Some(Decimal::new(519_999, 2)));

        let tasks_after = task_ops::get_tasks_for_order(&db, order.id).await?;
        assert_eq!(tasks_before, tasks_after);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_template_change_does_not_regenerate_tasks() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        let exhumation = create_test_template(&db, TemplateKind::Exhumation).await?;

        let mut fields = OrderFields::from(&order);
        fields.template_id = exhumation.id;
        let updated = update_order(&db, order.id, fields).await?;
        assert_eq!(updated.template_id, exhumation.id);

        let tasks = task_ops::get_tasks_for_order(&db, order.id).await?;
        assert_eq!(tasks.len(), 12);
        assert!(tasks.iter().all(|t| t.order_template_id == Some(order.template_id)));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_client_change_blocked_by_payments() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        let other = create_test_client(&db, "85120398765").await?;

        // No payments yet: the client may change.
        let mut fields = OrderFields::from(&order);
        fields.client_id = other.id;
        let moved = update_order(&db, order.id, fields).await?;
        assert_eq!(moved.client_id, other.id);

        payment_ops::create_payment(
            &db,
            order.id,
            other.id,
            Decimal::from(300),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            PaymentMethod::Cash,
        )
        .await?;

        let mut fields = OrderFields::from(&moved);
        fields.client_id = order.client_id;
        let result = update_order(&db, order.id, fields).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let stored = get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(stored.client_id, other.id);
        let payments = payment_ops::get_payments_for_order(&db, order.id).await?;
        assert!(payments.iter().all(|p| p.client_id == stored.client_id));

        // Other edits still go through with payments present.
        let mut fields = OrderFields::from(&stored);
        fields.font = Some("Antykwa".to_string());
        assert!(update_order(&db, order.id, fields).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn test_inscription_image_is_stored() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        assert_eq!(order.inscription_image, None);

        let mut fields = OrderFields::from(&order);
        fields.inscription_image = Some(" inscription_images/tablica.jpg ".to_string());
        let updated = update_order(&db, order.id, fields).await?;
        assert_eq!(
            updated.inscription_image.as_deref(),
            Some("inscription_images/tablica.jpg")
        );
        assert_eq!(
            OrderFields::from(&updated).inscription_image.as_deref(),
            Some("inscription_images/tablica.jpg")
        );

        let mut fields = OrderFields::from(&updated);
        fields.inscription_image = Some("  ".to_string());
        let cleared = update_order(&db, order.id, fields).await?;
        assert_eq!(cleared.inscription_image, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_order(&db, 42, test_order_fields()).await;
        assert!(matches!(result, Err(Error::OrderNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_resave_recomputes_after_material_price_change() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        let material_id = order.covering_material_id.unwrap();

        crate::core::material::update_material_price(&db, material_id, Decimal::from(150)).await?;

        // Stored total is only refreshed on the next save
        let stale = get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(stale.total_cost, Some(Decimal::from(5270)));

        let saved = set_order_status(&db, order.id, OrderStatus::Accepted).await?;
        assert_eq!(saved.total_cost, Some(Decimal::from(5370)));
        assert_eq!(saved.status, OrderStatus::Accepted);

        Ok(())
    }

    #[tokio::test]
    async fn test_status_accepts_any_transition() -> Result<()> {
        let (db, order) = setup_with_order().await?;

        let done = set_order_status(&db, order.id, OrderStatus::Completed).await?;
        assert_eq!(done.status, OrderStatus::Completed);

        let back = set_order_status(&db, order.id, OrderStatus::Quote).await?;
        assert_eq!(back.status, OrderStatus::Quote);

        // Re-saving never duplicates tasks
        assert_eq!(task_ops::get_tasks_for_order(&db, order.id).await?.len(), 12);
        Ok(())
    }

    #[tokio::test]
    async fn test_orders_by_status() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        let second = create_order(
            &db,
            OrderFields {
                client_id: order.client_id,
                template_id: order.template_id,
                ..test_order_fields()
            },
        )
        .await?;

        set_order_status(&db, order.id, OrderStatus::AwaitingPayment).await?;
        set_order_status(&db, second.id, OrderStatus::Completed).await?;

        let awaiting = get_orders_awaiting_payment(&db).await?;
        assert_eq!(awaiting.len(), 1);
        assert_eq!(awaiting[0].id, order.id);

        let archived = get_archived_orders(&db).await?;
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].id, second.id);

        assert!(get_orders_by_status(&db, OrderStatus::InProgress).await?.is_empty());
        assert_eq!(get_all_orders(&db).await?.len(), 2);
        assert_eq!(get_orders_for_client(&db, order.client_id).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_order_cascades() -> Result<()> {
        let (db, order) = setup_with_order().await?;

        payment_ops::create_payment(
            &db,
            order.id,
            order.client_id,
            Decimal::from(100),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            PaymentMethod::Card,
        )
        .await?;
        photo_ops::add_photo(&db, order.id, "order_photos/before.jpg".to_string()).await?;

        delete_order(&db, order.id).await?;

        assert!(get_order_by_id(&db, order.id).await?.is_none());
        assert!(task_ops::get_tasks_for_order(&db, order.id).await?.is_empty());
        assert!(photo_ops::get_photos_for_order(&db, order.id).await?.is_empty());
        assert!(payment_ops::get_payments_for_order(&db, order.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_order_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_order(&db, 7).await;
        assert!(matches!(result, Err(Error::OrderNotFound { id: 7 })));
        Ok(())
    }
}
