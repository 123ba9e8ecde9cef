//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod client;
pub mod employee;
pub mod enums;
pub mod material;
pub mod order;
pub mod order_template;
pub mod payment;
pub mod photo;
pub mod task;

// Re-export specific types to avoid conflicts
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use enums::{GraveSize, GraveType, OrderStatus, PaymentMethod, TemplateKind};
pub use material::{Column as MaterialColumn, Entity as Material, Model as MaterialModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_template::{
    Column as OrderTemplateColumn, Entity as OrderTemplate, Model as OrderTemplateModel,
};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use photo::{Column as PhotoColumn, Entity as Photo, Model as PhotoModel};
pub use task::{Column as TaskColumn, Entity as Task, Model as TaskModel};
