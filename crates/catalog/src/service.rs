//! Product aggregation service.
//!
//! ## Pipeline
//!
//! 1. Load the base records of the requested numbers from the gateway.
//! 2. Run every batch collaborator against that base batch.
//! 3. Walk the requested numbers in caller order and assemble each product
//!    found in the base batch. Attachment order per product is fixed:
//!    price-calculation staging, batch attachments (graduated price rules
//!    before the cheapest price rule), marketing flags, price calculation.
//!
//! Numbers missing from the base batch are dropped silently. Numbers missing
//! from a collaborator's mapping get that attachment's empty default. Any
//! gateway or collaborator failure aborts the request unchanged.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

use storefront_core::{OrderNumber, ShopContext};
use storefront_products::{
    ConfiguratorGroup, Download, Link, ListProduct, MarketingAttribute, Media, PriceRule, Product,
    ProductBuilder, ProductState, PropertySet, Vote,
};

use crate::collaborators::{
    CheapestPriceService, ConfiguratorService, Contributions, DownloadService,
    GraduatedPriceService, LinkService, MarketingService, MediaService, PriceCalculator,
    PropertyService, RelatedProductsService, SimilarProductsService, VoteService,
};
use crate::config::{FetchStrategy, ProductServiceConfig};
use crate::error::{CollaboratorError, ProductServiceError};
use crate::gateway::{ProductBatch, ProductGateway};

/// One implementation per collaborator capability.
#[derive(Clone)]
pub struct ProductCollaborators {
    pub graduated_prices: Arc<dyn GraduatedPriceService>,
    pub cheapest_price: Arc<dyn CheapestPriceService>,
    pub votes: Arc<dyn VoteService>,
    pub related_products: Arc<dyn RelatedProductsService>,
    pub similar_products: Arc<dyn SimilarProductsService>,
    pub downloads: Arc<dyn DownloadService>,
    pub links: Arc<dyn LinkService>,
    pub media: Arc<dyn MediaService>,
    pub properties: Arc<dyn PropertyService>,
    pub configurator: Arc<dyn ConfiguratorService>,
    pub marketing: Arc<dyn MarketingService>,
    pub price_calculator: Arc<dyn PriceCalculator>,
}

/// Batch collaborator output for one request.
struct SatelliteData {
    graduated_prices: Contributions<Vec<PriceRule>>,
    cheapest_prices: Contributions<PriceRule>,
    votes: Contributions<Vec<Vote>>,
    related_products: Contributions<Vec<ListProduct>>,
    similar_products: Contributions<Vec<ListProduct>>,
    downloads: Contributions<Vec<Download>>,
    links: Contributions<Vec<Link>>,
    media: Contributions<Vec<Media>>,
    covers: Contributions<Media>,
    properties: Contributions<PropertySet>,
    configuration: Contributions<Vec<ConfiguratorGroup>>,
}

/// Assembles store-front-ready products.
#[derive(Clone)]
pub struct ProductService {
    gateway: Arc<dyn ProductGateway>,
    collaborators: ProductCollaborators,
    config: ProductServiceConfig,
}

impl ProductService {
    pub fn new(
        gateway: Arc<dyn ProductGateway>,
        collaborators: ProductCollaborators,
        config: ProductServiceConfig,
    ) -> Self {
        Self {
            gateway,
            collaborators,
            config,
        }
    }

    pub fn config(&self) -> &ProductServiceConfig {
        &self.config
    }

    /// Single product; same record `get_list(&[number])` yields for it.
    pub async fn get(
        &self,
        number: &OrderNumber,
        context: &ShopContext,
    ) -> Result<Option<Product>, ProductServiceError> {
        let mut products = self.get_list(std::slice::from_ref(number), context).await?;
        Ok(products.swap_remove(number))
    }

    /// Products for `numbers`, keyed and ordered as requested.
    ///
    /// The result holds exactly the requested numbers the gateway found; a
    /// number requested twice appears once, at its first position.
    #[tracing::instrument(
        name = "product_service.get_list",
        skip_all,
        fields(requested = numbers.len())
    )]
    pub async fn get_list(
        &self,
        numbers: &[OrderNumber],
        context: &ShopContext,
    ) -> Result<IndexMap<OrderNumber, Product>, ProductServiceError> {
        if numbers.is_empty() {
            return Ok(IndexMap::new());
        }

        let unique: Vec<OrderNumber> = numbers
            .iter()
            .collect::<IndexSet<_>>()
            .into_iter()
            .cloned()
            .collect();

        let mut base = self
            .gateway
            .get_list(&unique, context)
            .await
            .inspect_err(|e| warn!(error = %e, "product gateway failed"))?;

        debug!(found = base.len(), "loaded base products");

        if base.is_empty() {
            return Ok(IndexMap::new());
        }

        let mut satellites = match self.config.fetch_strategy {
            FetchStrategy::Concurrent => self.fetch_concurrent(&base, context).await,
            FetchStrategy::Sequential => self.fetch_sequential(&base, context).await,
        }
        .inspect_err(|e| {
            warn!(
                collaborator = %e.collaborator,
                error = %e.message,
                "collaborator lookup failed"
            )
        })?;

        let mut result = IndexMap::with_capacity(base.len());
        for number in numbers {
            if result.contains_key(number) {
                continue;
            }
            let Some(product) = base.swap_remove(number) else {
                debug!(number = %number, "requested product not found, skipping");
                continue;
            };
            let product = self
                .assemble(product, &mut satellites, context)
                .inspect_err(|e| {
                    warn!(
                        number = %number,
                        collaborator = %e.collaborator,
                        error = %e.message,
                        "product assembly failed"
                    )
                })?;
            result.insert(number.clone(), product);
        }

        Ok(result)
    }

    async fn fetch_concurrent(
        &self,
        base: &ProductBatch,
        context: &ShopContext,
    ) -> Result<SatelliteData, CollaboratorError> {
        let c = &self.collaborators;
        let (
            graduated_prices,
            cheapest_prices,
            votes,
            related_products,
            similar_products,
            downloads,
            links,
            media,
            covers,
            properties,
            configuration,
        ) = tokio::try_join!(
            c.graduated_prices.get_list(base, context),
            c.cheapest_price.get_list(base, context),
            c.votes.get_list(base, context),
            c.related_products.get_list(base, context),
            c.similar_products.get_list(base, context),
            c.downloads.get_list(base, context),
            c.links.get_list(base),
            c.media.products_media(base, context),
            c.media.covers(base, context),
            c.properties.get_list(base, context),
            c.configurator.products_configurations(base, context),
        )?;

        Ok(SatelliteData {
            graduated_prices,
            cheapest_prices,
            votes,
            related_products,
            similar_products,
            downloads,
            links,
            media,
            covers,
            properties,
            configuration,
        })
    }

    async fn fetch_sequential(
        &self,
        base: &ProductBatch,
        context: &ShopContext,
    ) -> Result<SatelliteData, CollaboratorError> {
        let c = &self.collaborators;
        Ok(SatelliteData {
            graduated_prices: c.graduated_prices.get_list(base, context).await?,
            cheapest_prices: c.cheapest_price.get_list(base, context).await?,
            votes: c.votes.get_list(base, context).await?,
            related_products: c.related_products.get_list(base, context).await?,
            similar_products: c.similar_products.get_list(base, context).await?,
            downloads: c.downloads.get_list(base, context).await?,
            links: c.links.get_list(base).await?,
            media: c.media.products_media(base, context).await?,
            covers: c.media.covers(base, context).await?,
            properties: c.properties.get_list(base, context).await?,
            configuration: c.configurator.products_configurations(base, context).await?,
        })
    }

    fn assemble(
        &self,
        base: ListProduct,
        data: &mut SatelliteData,
        context: &ShopContext,
    ) -> Result<Product, CollaboratorError> {
        let number = base.number().clone();
        let mut product = ProductBuilder::new(base);

        product.add_state(ProductState::PriceCalculated);
        product.set_related_products(data.related_products.remove(&number).unwrap_or_default());
        product.set_similar_products(data.similar_products.remove(&number).unwrap_or_default());
        product.set_price_rules(data.graduated_prices.remove(&number).unwrap_or_default());
        product.set_votes(data.votes.remove(&number).unwrap_or_default());
        product.set_downloads(data.downloads.remove(&number).unwrap_or_default());
        product.set_links(data.links.remove(&number).unwrap_or_default());
        product.set_media(data.media.remove(&number).unwrap_or_default());
        product.set_property_set(data.properties.remove(&number));
        product.set_configuration(data.configuration.remove(&number).unwrap_or_default());
        product.set_cheapest_price_rule(data.cheapest_prices.remove(&number));
        product.set_cover(data.covers.remove(&number));

        let marketing = self.collaborators.marketing.product_attribute(&product)?;
        product.add_attribute(MarketingAttribute::NAME, marketing.into());

        self.collaborators
            .price_calculator
            .calculate_product(&mut product, context)?;

        Ok(product.finish())
    }
}
