use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use storefront_catalog::{
    CheapestPriceService, Collaborator, CollaboratorError, ConfiguratorService, Contributions,
    DownloadService, GraduatedPriceService, LinkService, MediaService, ProductBatch,
    PropertyService, RelatedProductsService, SimilarProductsService, VoteService,
};
use storefront_core::{Entity, OrderNumber, ShopContext};
use storefront_products::{
    ConfiguratorGroup, Download, Link, ListProduct, Media, PriceRule, PropertySet, Vote,
};

#[derive(Debug, Default)]
struct CatalogData {
    graduated_prices: HashMap<OrderNumber, Vec<PriceRule>>,
    cheapest_prices: HashMap<OrderNumber, PriceRule>,
    votes: HashMap<OrderNumber, Vec<Vote>>,
    related_products: HashMap<OrderNumber, Vec<ListProduct>>,
    similar_products: HashMap<OrderNumber, Vec<ListProduct>>,
    downloads: HashMap<OrderNumber, Vec<Download>>,
    links: HashMap<OrderNumber, Vec<Link>>,
    media: HashMap<OrderNumber, Vec<Media>>,
    covers: HashMap<OrderNumber, Media>,
    properties: HashMap<OrderNumber, PropertySet>,
    configurations: HashMap<OrderNumber, Vec<ConfiguratorGroup>>,
}

/// In-memory satellite data for tests/dev.
///
/// Implements every batch collaborator contract. Each lookup only consults the
/// numbers of the base batch it is given; numbers without stored data are
/// left out of the returned mapping.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<CatalogData>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self, apply: impl FnOnce(&mut CatalogData)) {
        if let Ok(mut data) = self.inner.write() {
            apply(&mut data);
        }
    }

    fn lookup<T: Clone>(
        &self,
        collaborator: Collaborator,
        products: &ProductBatch,
        select: impl Fn(&CatalogData) -> &HashMap<OrderNumber, T>,
    ) -> Result<Contributions<T>, CollaboratorError> {
        let data = self
            .inner
            .read()
            .map_err(|_| CollaboratorError::new(collaborator, "lock poisoned"))?;
        let source = select(&data);

        Ok(products
            .values()
            .filter_map(|product| {
                let number = product.id();
                source.get(number).map(|value| (number.clone(), value.clone()))
            })
            .collect())
    }

    pub fn set_graduated_prices(&self, number: OrderNumber, rules: Vec<PriceRule>) {
        self.write(|d| {
            d.graduated_prices.insert(number, rules);
        });
    }

    pub fn set_cheapest_price(&self, number: OrderNumber, rule: PriceRule) {
        self.write(|d| {
            d.cheapest_prices.insert(number, rule);
        });
    }

    pub fn set_votes(&self, number: OrderNumber, votes: Vec<Vote>) {
        self.write(|d| {
            d.votes.insert(number, votes);
        });
    }

    pub fn set_related_products(&self, number: OrderNumber, products: Vec<ListProduct>) {
        self.write(|d| {
            d.related_products.insert(number, products);
        });
    }

    pub fn set_similar_products(&self, number: OrderNumber, products: Vec<ListProduct>) {
        self.write(|d| {
            d.similar_products.insert(number, products);
        });
    }

    pub fn set_downloads(&self, number: OrderNumber, downloads: Vec<Download>) {
        self.write(|d| {
            d.downloads.insert(number, downloads);
        });
    }

    pub fn set_links(&self, number: OrderNumber, links: Vec<Link>) {
        self.write(|d| {
            d.links.insert(number, links);
        });
    }

    pub fn set_media(&self, number: OrderNumber, media: Vec<Media>) {
        self.write(|d| {
            d.media.insert(number, media);
        });
    }

    pub fn set_cover(&self, number: OrderNumber, cover: Media) {
        self.write(|d| {
            d.covers.insert(number, cover);
        });
    }

    pub fn set_property_set(&self, number: OrderNumber, set: PropertySet) {
        self.write(|d| {
            d.properties.insert(number, set);
        });
    }

    pub fn set_configuration(&self, number: OrderNumber, groups: Vec<ConfiguratorGroup>) {
        self.write(|d| {
            d.configurations.insert(number, groups);
        });
    }

    /// Drop all stored data for `number`.
    pub fn remove(&self, number: &OrderNumber) {
        self.write(|d| {
            d.graduated_prices.remove(number);
            d.cheapest_prices.remove(number);
            d.votes.remove(number);
            d.related_products.remove(number);
            d.similar_products.remove(number);
            d.downloads.remove(number);
            d.links.remove(number);
            d.media.remove(number);
            d.covers.remove(number);
            d.properties.remove(number);
            d.configurations.remove(number);
        });
    }
}

#[async_trait]
impl GraduatedPriceService for InMemoryCatalogStore {
    async fn get_list(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<Vec<PriceRule>>, CollaboratorError> {
        self.lookup(Collaborator::GraduatedPrices, products, |d| &d.graduated_prices)
    }
}

#[async_trait]
impl CheapestPriceService for InMemoryCatalogStore {
    async fn get_list(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<PriceRule>, CollaboratorError> {
        self.lookup(Collaborator::CheapestPrice, products, |d| &d.cheapest_prices)
    }
}

#[async_trait]
impl VoteService for InMemoryCatalogStore {
    async fn get_list(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<Vec<Vote>>, CollaboratorError> {
        self.lookup(Collaborator::Votes, products, |d| &d.votes)
    }
}

#[async_trait]
impl RelatedProductsService for InMemoryCatalogStore {
    async fn get_list(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<Vec<ListProduct>>, CollaboratorError> {
        self.lookup(Collaborator::RelatedProducts, products, |d| &d.related_products)
    }
}

#[async_trait]
impl SimilarProductsService for InMemoryCatalogStore {
    async fn get_list(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<Vec<ListProduct>>, CollaboratorError> {
        self.lookup(Collaborator::SimilarProducts, products, |d| &d.similar_products)
    }
}

#[async_trait]
impl DownloadService for InMemoryCatalogStore {
    async fn get_list(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<Vec<Download>>, CollaboratorError> {
        self.lookup(Collaborator::Downloads, products, |d| &d.downloads)
    }
}

#[async_trait]
impl LinkService for InMemoryCatalogStore {
    async fn get_list(
        &self,
        products: &ProductBatch,
    ) -> Result<Contributions<Vec<Link>>, CollaboratorError> {
        self.lookup(Collaborator::Links, products, |d| &d.links)
    }
}

#[async_trait]
impl MediaService for InMemoryCatalogStore {
    async fn products_media(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<Vec<Media>>, CollaboratorError> {
        self.lookup(Collaborator::Media, products, |d| &d.media)
    }

    async fn covers(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<Media>, CollaboratorError> {
        self.lookup(Collaborator::Covers, products, |d| &d.covers)
    }
}

#[async_trait]
impl PropertyService for InMemoryCatalogStore {
    async fn get_list(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<PropertySet>, CollaboratorError> {
        self.lookup(Collaborator::Properties, products, |d| &d.properties)
    }
}

#[async_trait]
impl ConfiguratorService for InMemoryCatalogStore {
    async fn products_configurations(
        &self,
        products: &ProductBatch,
        _context: &ShopContext,
    ) -> Result<Contributions<Vec<ConfiguratorGroup>>, CollaboratorError> {
        self.lookup(Collaborator::Configuration, products, |d| &d.configurations)
    }
}
