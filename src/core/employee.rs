//! Employee business logic - Workshop staff that tasks are assigned to.

use crate::{
    entities::{Employee, Task, employee, task},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

fn validate(first_name: &str, last_name: &str, position: &str) -> Result<()> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Employee first and last name are required".to_string(),
        });
    }
    if position.trim().is_empty() {
        return Err(Error::Validation {
            message: "Employee position cannot be empty".to_string(),
        });
    }
    Ok(())
}

fn clean_email(email: Option<String>) -> Option<String> {
    email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}

/// Adds an employee.
#[instrument(skip(db, email))]
pub async fn create_employee(
    db: &DatabaseConnection,
    first_name: String,
    last_name: String,
    position: String,
    email: Option<String>,
) -> Result<employee::Model> {
    validate(&first_name, &last_name, &position)?;

    let model = employee::ActiveModel {
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        position: Set(position.trim().to_string()),
        email: Set(clean_email(email)),
        ..Default::default()
    };
    let employee = model.insert(db).await?;
    info!(employee_id = employee.id, "Employee created");
    Ok(employee)
}

/// Retrieves an employee by its unique ID.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all employees sorted by last name, then first name.
pub async fn get_all_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>> {
    Employee::find()
        .order_by_asc(employee::Column::LastName)
        .order_by_asc(employee::Column::FirstName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replaces an employee's details.
pub async fn update_employee(
    db: &DatabaseConnection,
    employee_id: i64,
    first_name: String,
    last_name: String,
    position: String,
    email: Option<String>,
) -> Result<employee::Model> {
    validate(&first_name, &last_name, &position)?;

    let mut employee: employee::ActiveModel = Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?
        .into();

    employee.first_name = Set(first_name.trim().to_string());
    employee.last_name = Set(last_name.trim().to_string());
    employee.position = Set(position.trim().to_string());
    employee.email = Set(clean_email(email));
    employee.update(db).await.map_err(Into::into)
}

/// Removes an employee. Their tasks stay and become unassigned.
#[instrument(skip(db))]
pub async fn delete_employee(db: &DatabaseConnection, employee_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let unassigned = Task::update_many()
        .col_expr(task::Column::AssignedTo, Expr::value(Option::<i64>::None))
        .filter(task::Column::AssignedTo.eq(employee_id))
        .exec(&txn)
        .await?
        .rows_affected;

    let result = Employee::delete_by_id(employee_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(Error::EmployeeNotFound { id: employee_id });
    }

    txn.commit().await?;
    info!(employee_id, unassigned, "Employee deleted");
    Ok(())
}
