/// Database configuration and connection management
pub mod database;

/// Seed data (materials, template descriptions) loaded from config.toml
pub mod catalog;
