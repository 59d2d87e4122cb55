use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the batch collaborator lookups of one request are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    /// All lookups polled together; the first failure aborts the request.
    #[default]
    Concurrent,
    /// Lookups awaited one after another.
    Sequential,
}

impl FromStr for FetchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concurrent" => Ok(FetchStrategy::Concurrent),
            "sequential" => Ok(FetchStrategy::Sequential),
            other => Err(format!("unknown fetch strategy '{other}'")),
        }
    }
}

/// [`crate::ProductService`] configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductServiceConfig {
    pub fetch_strategy: FetchStrategy,
}

impl ProductServiceConfig {
    pub fn with_fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.fetch_strategy = strategy;
        self
    }
}
