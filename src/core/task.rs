//! Task business logic - Checklists attached to orders.
//!
//! Default tasks are produced from the order's template when the order is
//! created (see `create_default_tasks`). Operators can add their own tasks,
//! assign them to employees and tick them off; an order's progress is the
//! share of completed tasks.

use crate::{
    core::templates::get_default_tasks,
    entities::{Employee, Order, OrderTemplate, Task, order_template, task},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Inserts the template's default tasks for a freshly created order.
///
/// Tasks are inserted one by one in list order, so ascending ids follow the
/// workflow. Each task keeps a reference to the template it came from.
pub(crate) async fn create_default_tasks<C>(
    conn: &C,
    order_id: i64,
    template: &order_template::Model,
) -> Result<Vec<task::Model>>
where
    C: ConnectionTrait,
{
    let definitions = get_default_tasks(template.kind);
    let now = Utc::now();
    let mut created = Vec::with_capacity(definitions.len());

    for definition in definitions {
        let model = task::ActiveModel {
            order_id: Set(Some(order_id)),
            order_template_id: Set(Some(template.id)),
            name: Set(definition.name.to_string()),
            description: Set(definition.description.to_string()),
            assigned_to: Set(None),
            completed: Set(false),
            created_at: Set(now),
            image: Set(None),
            ..Default::default()
        };
        created.push(model.insert(conn).await?);
    }

    debug!(order_id, count = created.len(), "Default tasks created");
    Ok(created)
}

/// Creates a task by hand, either on an order or standalone.
///
/// An empty description is stored as "Brak opisu". The order and the
/// assignee, when given, must exist.
#[instrument(skip(db, description))]
pub async fn create_task(
    db: &DatabaseConnection,
    order_id: Option<i64>,
    name: String,
    description: Option<String>,
    assigned_to: Option<i64>,
) -> Result<task::Model> {
    validate_name(&name)?;

    if let Some(order_id) = order_id {
        Order::find_by_id(order_id)
            .one(db)
            .await?
            .ok_or(Error::OrderNotFound { id: order_id })?;
    }

    insert_task(db, order_id, None, name, description, assigned_to).await
}

/// Creates a task bound to an order template rather than to an order.
///
/// Such tasks are listed with the template and count as template tasks in
/// `split_default_and_added_tasks`. The template and the assignee, when
/// given, must exist.
#[instrument(skip(db, description))]
pub async fn create_template_task(
    db: &DatabaseConnection,
    template_id: i64,
    name: String,
    description: Option<String>,
    assigned_to: Option<i64>,
) -> Result<task::Model> {
    validate_name(&name)?;

    OrderTemplate::find_by_id(template_id)
        .one(db)
        .await?
        .ok_or(Error::TemplateNotFound { id: template_id })?;

    insert_task(db, None, Some(template_id), name, description, assigned_to).await
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Task name cannot be empty".to_string(),
        });
    }
    Ok(())
}

async fn insert_task(
    db: &DatabaseConnection,
    order_id: Option<i64>,
    order_template_id: Option<i64>,
    name: String,
    description: Option<String>,
    assigned_to: Option<i64>,
) -> Result<task::Model> {
    if let Some(employee_id) = assigned_to {
        Employee::find_by_id(employee_id)
            .one(db)
            .await?
            .ok_or(Error::EmployeeNotFound { id: employee_id })?;
    }

    let model = task::ActiveModel {
        order_id: Set(order_id),
        order_template_id: Set(order_template_id),
        name: Set(name.trim().to_string()),
        description: Set(normalize_description(description)),
        assigned_to: Set(assigned_to),
        completed: Set(false),
        created_at: Set(Utc::now()),
        image: Set(None),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

fn normalize_description(description: Option<String>) -> String {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| task::DEFAULT_DESCRIPTION.to_string())
}

/// Retrieves a task by its unique ID.
pub async fn get_task_by_id(db: &DatabaseConnection, task_id: i64) -> Result<Option<task::Model>> {
    Task::find_by_id(task_id).one(db).await.map_err(Into::into)
}

/// Retrieves the tasks of an order in creation order.
pub async fn get_tasks_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<task::Model>> {
    Task::find()
        .filter(task::Column::OrderId.eq(order_id))
        .order_by_asc(task::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the tasks bound to a template, whether or not they sit on an
/// order.
pub async fn get_tasks_for_template(
    db: &DatabaseConnection,
    template_id: i64,
) -> Result<Vec<task::Model>> {
    Task::find()
        .filter(task::Column::OrderTemplateId.eq(template_id))
        .order_by_asc(task::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every task, oldest first.
pub async fn get_all_tasks(db: &DatabaseConnection) -> Result<Vec<task::Model>> {
    Task::find()
        .order_by_asc(task::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the tasks assigned to one employee.
pub async fn get_tasks_for_employee(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Vec<task::Model>> {
    Task::find()
        .filter(task::Column::AssignedTo.eq(employee_id))
        .order_by_asc(task::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_task(db: &DatabaseConnection, task_id: i64) -> Result<task::ActiveModel> {
    Task::find_by_id(task_id)
        .one(db)
        .await?
        .map(Into::into)
        .ok_or(Error::TaskNotFound { id: task_id })
}

/// Updates a task's name, description and assignee.
pub async fn update_task(
    db: &DatabaseConnection,
    task_id: i64,
    name: String,
    description: Option<String>,
    assigned_to: Option<i64>,
) -> Result<task::Model> {
    validate_name(&name)?;

    if let Some(employee_id) = assigned_to {
        Employee::find_by_id(employee_id)
            .one(db)
            .await?
            .ok_or(Error::EmployeeNotFound { id: employee_id })?;
    }

    let mut task = find_task(db, task_id).await?;
    task.name = Set(name.trim().to_string());
    task.description = Set(normalize_description(description));
    task.assigned_to = Set(assigned_to);
    task.update(db).await.map_err(Into::into)
}

/// Marks a task done or not done.
#[instrument(skip(db))]
pub async fn set_task_completed(
    db: &DatabaseConnection,
    task_id: i64,
    completed: bool,
) -> Result<task::Model> {
    let mut task = find_task(db, task_id).await?;
    task.completed = Set(completed);
    task.update(db).await.map_err(Into::into)
}

/// Attaches (or with `None`, removes) the photo documenting a task.
pub async fn set_task_image(
    db: &DatabaseConnection,
    task_id: i64,
    image: Option<String>,
) -> Result<task::Model> {
    let mut task = find_task(db, task_id).await?;
    task.image = Set(image.filter(|path| !path.trim().is_empty()));
    task.update(db).await.map_err(Into::into)
}

/// Deletes a task.
pub async fn delete_task(db: &DatabaseConnection, task_id: i64) -> Result<()> {
    let result = Task::delete_by_id(task_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::TaskNotFound { id: task_id });
    }
    Ok(())
}

/// Splits an order's tasks into template defaults and tasks added by hand,
/// keeping the relative order of each group.
#[must_use]
pub fn split_default_and_added_tasks(
    tasks: Vec<task::Model>,
) -> (Vec<task::Model>, Vec<task::Model>) {
    tasks
        .into_iter()
        .partition(|task| task.order_template_id.is_some())
}
