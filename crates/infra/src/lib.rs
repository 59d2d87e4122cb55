//! Infrastructure layer: product data access, collaborator adapters, config.

pub mod collaborators;
pub mod config;
pub mod gateway;
pub mod wiring;

pub use collaborators::{DefaultMarketingService, InMemoryCatalogStore, MarketingConfig};
pub use config::{ConfigError, StorefrontConfig};
pub use gateway::{
    InMemoryRowSource, JsonProductHydrator, PostgresRowSource, ProductHydrator, ProductRow,
    RowProductGateway, RowSource, VARIANT_ORDER_NUMBER_COLUMN,
};
pub use wiring::{
    WiringError, collaborators_from_store, in_memory_product_service, postgres_product_gateway,
};
