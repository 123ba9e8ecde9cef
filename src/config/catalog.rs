//! Seed catalog loading from config.toml
//!
//! The workshop keeps its price list of materials and the descriptions of the
//! order templates in a TOML file. On start-up these are used to seed the
//! database: missing materials are inserted and every template kind gets a row.

use crate::entities::TemplateKind;
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Materials to make sure exist
    #[serde(default)]
    pub materials: Vec<MaterialConfig>,
    /// Descriptions for order templates
    #[serde(default)]
    pub templates: Vec<TemplateConfig>,
}

/// A single material price list entry
#[derive(Debug, Deserialize, Clone)]
pub struct MaterialConfig {
    /// Material name
    pub name: String,
    /// Unit price, written as a string to keep it exact (e.g. "450.00")
    pub price: Decimal,
}

/// Description for one template kind
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateConfig {
    /// Template slug (e.g. "nagrobek")
    pub kind: TemplateKind,
    /// Text shown next to the template name
    pub description: Option<String>,
}

impl Config {
    /// Description configured for `kind`, if any.
    #[must_use]
    pub fn template_description(&self, kind: TemplateKind) -> Option<&str> {
        self.templates
            .iter()
            .find(|template| template.kind == kind)
            .and_then(|template| template.description.as_deref())
    }
}

/// Loads the seed catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A template kind is unknown or a price is not a decimal number
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading catalog from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the catalog from the default location (./config.toml).
///
/// A missing file is not an error: the application then starts with an empty
/// catalog and only the template rows get seeded.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if !path.exists() {
        tracing::warn!("config.toml not found, starting with an empty catalog");
        return Ok(Config::default());
    }
    load_config(path)
}
