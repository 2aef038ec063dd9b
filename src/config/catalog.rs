//! Business configuration loading from ledger.toml
//!
//! The file names the business, the currency symbol used in statements, and an
//! optional starter catalog of products that is seeded into an account the
//! first time it runs.

use crate::entities::Unit;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Configuration structure representing the entire ledger.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Name printed on statements
    #[serde(default = "default_business_name")]
    pub business_name: String,
    /// Symbol prefixed to money amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Products to seed
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            business_name: default_business_name(),
            currency_symbol: default_currency_symbol(),
            products: Vec::new(),
        }
    }
}

/// Configuration for a single catalog product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Name of the product
    pub name: String,
    /// Price for `quantity` of `unit`
    pub price: f64,
    /// Amount the price buys
    pub quantity: f64,
    /// Unit the product is sold in
    pub unit: Unit,
}

fn default_business_name() -> String {
    "Dairy Ledger".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

/// Loads the configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A product entry is missing a field or names an unknown unit
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    parse_config(&contents)
}

/// Loads the configuration, falling back to defaults when the file does not exist
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        debug!("No config file at {:?}, using defaults", path.as_ref());
        Ok(Config::default())
    }
}

fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse ledger.toml: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_catalog_config() {
        let toml_str = r#"
            business_name = "Jay Goga Milk"

            [[products]]
            name = "Cow Milk"
            price = 60.0
            quantity = 1.0
            unit = "L"

            [[products]]
            name = "Eggs"
            price = 7.0
            quantity = 1.0
            unit = "piece"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.business_name, "Jay Goga Milk");
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].name, "Cow Milk");
        assert_eq!(config.products[0].price, 60.0);
        assert_eq!(config.products[0].unit, Unit::Litre);
        assert_eq!(config.products[1].unit, Unit::Piece);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.business_name, "Dairy Ledger");
        assert!(config.products.is_empty());
    }

    #[test]
    fn test_parse_unknown_unit_is_config_error() {
        let toml_str = r#"
            [[products]]
            name = "Butter"
            price = 50.0
            quantity = 100.0
            unit = "oz"
        "#;

        assert!(matches!(
            parse_config(toml_str),
            Err(Error::Config { message: _ })
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config_or_default("does/not/exist/ledger.toml").unwrap();
        assert_eq!(config.currency_symbol, "₹");
    }
}
