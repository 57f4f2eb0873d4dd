//! Catalog client configuration.

use thiserror::Error;

use catalogsync_products::{PriceMarkup, Product, placeholder_product};

pub const ENV_API_URL: &str = "CATALOG_API_URL";
pub const ENV_PRICE_MARKUP: &str = "CATALOG_PRICE_MARKUP";

const DEFAULT_API_URL: &str = "http://localhost:4200/api";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings for the sources and the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Base URL the resource paths are appended to.
    pub api_base_url: String,
    pub products_path: String,
    pub categories_path: String,
    pub suppliers_path: String,
    /// Price multiplier applied during enrichment.
    pub price_markup: PriceMarkup,
    /// Product submitted by `add_product(None)`.
    pub placeholder: Product,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            products_path: "products".to_string(),
            categories_path: "productCategories".to_string(),
            suppliers_path: "suppliers".to_string(),
            price_markup: PriceMarkup::DEFAULT,
            placeholder: placeholder_product(),
        }
    }
}

impl CatalogConfig {
    /// Load from the process environment, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            if url.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: ENV_API_URL,
                    value: url,
                });
            }
            config.api_base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_PRICE_MARKUP) {
            config.price_markup = raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(PriceMarkup::new)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_PRICE_MARKUP,
                    value: raw,
                })?;
        }

        Ok(config)
    }

    /// Full URL of a resource path.
    pub fn resource_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = CatalogConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.price_markup.factor(), 1.5);
        assert_eq!(
            config.resource_url(&config.products_path),
            "http://localhost:4200/api/products"
        );
    }

    #[test]
    fn reads_overrides() {
        let config = CatalogConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://shop.example.com/api/"),
            (ENV_PRICE_MARKUP, "2"),
        ]))
        .unwrap();

        assert_eq!(config.price_markup.factor(), 2.0);
        assert_eq!(
            config.resource_url("/suppliers"),
            "https://shop.example.com/api/suppliers"
        );
    }

    #[test]
    fn rejects_unparseable_markup() {
        let err = CatalogConfig::from_lookup(lookup(&[(ENV_PRICE_MARKUP, "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_PRICE_MARKUP,
                value: "lots".to_string()
            }
        );

        assert!(CatalogConfig::from_lookup(lookup(&[(ENV_PRICE_MARKUP, "-3")])).is_err());
    }
}
