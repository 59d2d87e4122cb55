//! Environment configuration.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `DATABASE_URL` | Postgres URL; enables the Postgres row source | unset |
//! | `STOREFRONT_PRODUCT_QUERY` | product SELECT statement | unset |
//! | `STOREFRONT_FETCH_STRATEGY` | `concurrent` or `sequential` | `concurrent` |
//! | `STOREFRONT_MARK_AS_NEW_DAYS` | days a product counts as new | `30` |
//! | `STOREFRONT_TOP_SELLER_THRESHOLD` | sales for the top-seller flag | `100` |

use core::str::FromStr;

use thiserror::Error;

use storefront_catalog::{FetchStrategy, ProductServiceConfig};

use crate::collaborators::MarketingConfig;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const PRODUCT_QUERY: &str = "STOREFRONT_PRODUCT_QUERY";
pub const FETCH_STRATEGY: &str = "STOREFRONT_FETCH_STRATEGY";
pub const MARK_AS_NEW_DAYS: &str = "STOREFRONT_MARK_AS_NEW_DAYS";
pub const TOP_SELLER_THRESHOLD: &str = "STOREFRONT_TOP_SELLER_THRESHOLD";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("DATABASE_URL is set but STOREFRONT_PRODUCT_QUERY is missing")]
    MissingProductQuery,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorefrontConfig {
    pub database_url: Option<String>,
    pub product_query: Option<String>,
    pub service: ProductServiceConfig,
    pub marketing: MarketingConfig,
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = get(DATABASE_URL);
        let product_query = get(PRODUCT_QUERY);
        if database_url.is_some() && product_query.is_none() {
            return Err(ConfigError::MissingProductQuery);
        }

        let defaults = MarketingConfig::default();
        let fetch_strategy: FetchStrategy =
            parse(FETCH_STRATEGY, get(FETCH_STRATEGY))?.unwrap_or_default();
        let mark_as_new_days =
            parse(MARK_AS_NEW_DAYS, get(MARK_AS_NEW_DAYS))?.unwrap_or(defaults.mark_as_new_days);
        let top_seller_threshold = parse(TOP_SELLER_THRESHOLD, get(TOP_SELLER_THRESHOLD))?
            .unwrap_or(defaults.top_seller_threshold);

        Ok(Self {
            database_url,
            product_query,
            service: ProductServiceConfig::default().with_fetch_strategy(fetch_strategy),
            marketing: MarketingConfig {
                mark_as_new_days,
                top_seller_threshold,
            },
        })
    }
}

fn parse<T>(key: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.map(|value| {
        value.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        })
    })
    .transpose()
}
