//! Collaborator adapters.

pub mod in_memory;
pub mod marketing;

pub use in_memory::InMemoryCatalogStore;
pub use marketing::{DefaultMarketingService, MarketingConfig};
