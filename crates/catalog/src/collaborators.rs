//! Collaborator contracts: one trait per kind of satellite product data.
//!
//! Batch collaborators receive the whole base batch and return a mapping from
//! order number to their contribution. A number missing from that mapping
//! means "no data" for the product. Batch calls are read-only and independent
//! of one another.
//!
//! [`MarketingService`] and [`PriceCalculator`] run per record, after the
//! batch data has been attached.

use std::collections::HashMap;

use async_trait::async_trait;

use storefront_core::{OrderNumber, ShopContext};
use storefront_products::{
    ConfiguratorGroup, Download, Link, ListProduct, MarketingAttribute, Media, PriceRule,
    ProductBuilder, PropertySet, Vote,
};

use crate::error::CollaboratorError;
use crate::gateway::ProductBatch;

/// Per-number contributions of one collaborator.
pub type Contributions<T> = HashMap<OrderNumber, T>;

#[async_trait]
pub trait GraduatedPriceService: Send + Sync {
    /// Quantity-graduated price rules for the context's customer group.
    async fn get_list(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<Vec<PriceRule>>, CollaboratorError>;
}

#[async_trait]
pub trait CheapestPriceService: Send + Sync {
    /// Cheapest price rule across all variants of each product.
    async fn get_list(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<PriceRule>, CollaboratorError>;
}

#[async_trait]
pub trait VoteService: Send + Sync {
    async fn get_list(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<Vec<Vote>>, CollaboratorError>;
}

#[async_trait]
pub trait RelatedProductsService: Send + Sync {
    async fn get_list(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<Vec<ListProduct>>, CollaboratorError>;
}

#[async_trait]
pub trait SimilarProductsService: Send + Sync {
    async fn get_list(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<Vec<ListProduct>>, CollaboratorError>;
}

#[async_trait]
pub trait DownloadService: Send + Sync {
    async fn get_list(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<Vec<Download>>, CollaboratorError>;
}

/// Links are shop-independent and need no context.
#[async_trait]
pub trait LinkService: Send + Sync {
    async fn get_list(
        &self,
        products: &ProductBatch,
    ) -> Result<Contributions<Vec<Link>>, CollaboratorError>;
}

#[async_trait]
pub trait MediaService: Send + Sync {
    /// All media assigned to each product (cover included).
    async fn products_media(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<Vec<Media>>, CollaboratorError>;

    /// Main image of each product.
    async fn covers(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<Media>, CollaboratorError>;
}

#[async_trait]
pub trait PropertyService: Send + Sync {
    async fn get_list(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<PropertySet>, CollaboratorError>;
}

#[async_trait]
pub trait ConfiguratorService: Send + Sync {
    /// Variant configuration of each product, with the requested variant's
    /// options selected.
    async fn products_configurations(
        &self,
        products: &ProductBatch,
        context: &ShopContext,
    ) -> Result<Contributions<Vec<ConfiguratorGroup>>, CollaboratorError>;
}

/// Computes the marketing flags of a partially assembled product.
pub trait MarketingService: Send + Sync {
    fn product_attribute(
        &self,
        product: &ProductBuilder,
    ) -> Result<MarketingAttribute, CollaboratorError>;
}

/// Turns the attached price rules into prices for the request context.
///
/// Runs last, after graduated price rules and the cheapest price rule are
/// attached; writes through [`ProductBuilder::set_prices`] and
/// [`ProductBuilder::set_cheapest_price`].
pub trait PriceCalculator: Send + Sync {
    fn calculate_product(
        &self,
        product: &mut ProductBuilder,
        context: &ShopContext,
    ) -> Result<(), CollaboratorError>;
}
