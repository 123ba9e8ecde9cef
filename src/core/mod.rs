//! Core business logic, independent of any user interface.
//!
//! Every operation takes a `&DatabaseConnection` and returns a
//! [`crate::errors::Result`]; front ends only translate input and output.

/// Client registration and maintenance
pub mod client;
/// Cost engine: total cost, payments balance and progress
pub mod cost;
/// Workshop staff
pub mod employee;
/// Material price list
pub mod material;
/// Order lifecycle: create, edit, status, delete
pub mod order;
/// Order template rows
pub mod order_template;
/// Payments received for orders
pub mod payment;
/// Site photos attached to orders
pub mod photo;
/// Daily report
pub mod report;
/// Order tasks and checklists
pub mod task;
/// Default task lists per template kind
pub mod templates;
