//! Composition helpers.

use std::sync::Arc;

use thiserror::Error;

use storefront_catalog::{
    GatewayError, PriceCalculator, ProductCollaborators, ProductGateway, ProductService,
};

use crate::collaborators::{DefaultMarketingService, InMemoryCatalogStore};
use crate::config::{ConfigError, StorefrontConfig};
use crate::gateway::{InMemoryRowSource, PostgresRowSource, RowProductGateway};

#[derive(Debug, Error)]
pub enum WiringError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Every batch capability served by `store`.
pub fn collaborators_from_store(
    store: Arc<InMemoryCatalogStore>,
    marketing: DefaultMarketingService,
    price_calculator: Arc<dyn PriceCalculator>,
) -> ProductCollaborators {
    ProductCollaborators {
        graduated_prices: store.clone(),
        cheapest_price: store.clone(),
        votes: store.clone(),
        related_products: store.clone(),
        similar_products: store.clone(),
        downloads: store.clone(),
        links: store.clone(),
        media: store.clone(),
        properties: store.clone(),
        configurator: store,
        marketing: Arc::new(marketing),
        price_calculator,
    }
}

/// Fully in-memory product service for tests, benchmarks and development.
pub fn in_memory_product_service(
    rows: Arc<InMemoryRowSource>,
    store: Arc<InMemoryCatalogStore>,
    price_calculator: Arc<dyn PriceCalculator>,
    config: &StorefrontConfig,
) -> ProductService {
    let gateway: Arc<dyn ProductGateway> = Arc::new(RowProductGateway::new(rows));
    let marketing = DefaultMarketingService::new(config.marketing);

    ProductService::new(
        gateway,
        collaborators_from_store(store, marketing, price_calculator),
        config.service.clone(),
    )
}

/// Postgres-backed gateway, or `None` when no database is configured.
pub async fn postgres_product_gateway(
    config: &StorefrontConfig,
) -> Result<Option<Arc<dyn ProductGateway>>, WiringError> {
    let Some(url) = config.database_url.as_deref() else {
        return Ok(None);
    };
    let statement = config
        .product_query
        .clone()
        .ok_or(ConfigError::MissingProductQuery)?;

    let rows = PostgresRowSource::connect(url, statement).await?;
    tracing::info!("product gateway connected to postgres");
    Ok(Some(Arc::new(RowProductGateway::new(rows))))
}
