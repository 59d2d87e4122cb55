//! Staged assembly of the storefront product record.
//!
//! [`ProductBuilder`] is the only mutable form of a product. It starts from a
//! hydrated [`ListProduct`] with every attachment set to its empty default, is
//! filled by the aggregation pipeline, and is consumed by
//! [`ProductBuilder::finish`] into a read-only [`Product`].

use serde::Serialize;

use storefront_core::{Entity, OrderNumber};

use crate::attribute::{Attribute, MarketingAttribute};
use crate::configurator::ConfiguratorGroup;
use crate::download::Download;
use crate::link::Link;
use crate::media::Media;
use crate::price::{Price, PriceRule, Tax, Unit};
use crate::product::{ListProduct, ProductState};
use crate::property::PropertySet;
use crate::vote::Vote;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductBuilder {
    base: ListProduct,
    related_products: Vec<ListProduct>,
    similar_products: Vec<ListProduct>,
    price_rules: Vec<PriceRule>,
    cheapest_price_rule: Option<PriceRule>,
    votes: Vec<Vote>,
    downloads: Vec<Download>,
    links: Vec<Link>,
    media: Vec<Media>,
    cover: Option<Media>,
    property_set: Option<PropertySet>,
    configuration: Vec<ConfiguratorGroup>,
    prices: Vec<Price>,
    cheapest_price: Option<Price>,
}

impl ProductBuilder {
    pub fn new(base: ListProduct) -> Self {
        Self {
            base,
            related_products: Vec::new(),
            similar_products: Vec::new(),
            price_rules: Vec::new(),
            cheapest_price_rule: None,
            votes: Vec::new(),
            downloads: Vec::new(),
            links: Vec::new(),
            media: Vec::new(),
            cover: None,
            property_set: None,
            configuration: Vec::new(),
            prices: Vec::new(),
            cheapest_price: None,
        }
    }

    pub fn number(&self) -> &OrderNumber {
        self.base.number()
    }

    pub fn base(&self) -> &ListProduct {
        &self.base
    }

    pub fn tax(&self) -> &Tax {
        self.base.tax()
    }

    pub fn unit(&self) -> Option<&Unit> {
        self.base.unit()
    }

    pub fn price_rules(&self) -> &[PriceRule] {
        &self.price_rules
    }

    pub fn cheapest_price_rule(&self) -> Option<&PriceRule> {
        self.cheapest_price_rule.as_ref()
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn add_state(&mut self, state: ProductState) {
        self.base.add_state(state);
    }

    pub fn add_attribute(&mut self, name: impl Into<String>, attribute: Attribute) {
        self.base.add_attribute(name, attribute);
    }

    pub fn set_related_products(&mut self, products: Vec<ListProduct>) {
        self.related_products = products;
    }

    pub fn set_similar_products(&mut self, products: Vec<ListProduct>) {
        self.similar_products = products;
    }

    pub fn set_price_rules(&mut self, rules: Vec<PriceRule>) {
        self.price_rules = rules;
    }

    pub fn set_cheapest_price_rule(&mut self, rule: Option<PriceRule>) {
        self.cheapest_price_rule = rule;
    }

    pub fn set_votes(&mut self, votes: Vec<Vote>) {
        self.votes = votes;
    }

    pub fn set_downloads(&mut self, downloads: Vec<Download>) {
        self.downloads = downloads;
    }

    pub fn set_links(&mut self, links: Vec<Link>) {
        self.links = links;
    }

    pub fn set_media(&mut self, media: Vec<Media>) {
        self.media = media;
    }

    pub fn set_cover(&mut self, cover: Option<Media>) {
        self.cover = cover;
    }

    pub fn set_property_set(&mut self, property_set: Option<PropertySet>) {
        self.property_set = property_set;
    }

    pub fn set_configuration(&mut self, configuration: Vec<ConfiguratorGroup>) {
        self.configuration = configuration;
    }

    /// Calculated prices, one per graduated price rule.
    pub fn set_prices(&mut self, prices: Vec<Price>) {
        self.prices = prices;
    }

    pub fn set_cheapest_price(&mut self, price: Option<Price>) {
        self.cheapest_price = price;
    }

    pub fn finish(self) -> Product {
        Product {
            base: self.base,
            related_products: self.related_products,
            similar_products: self.similar_products,
            price_rules: self.price_rules,
            cheapest_price_rule: self.cheapest_price_rule,
            votes: self.votes,
            downloads: self.downloads,
            links: self.links,
            media: self.media,
            cover: self.cover,
            property_set: self.property_set,
            configuration: self.configuration,
            prices: self.prices,
            cheapest_price: self.cheapest_price,
        }
    }
}

/// Fully assembled, store-front-ready product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(flatten)]
    base: ListProduct,
    related_products: Vec<ListProduct>,
    similar_products: Vec<ListProduct>,
    price_rules: Vec<PriceRule>,
    cheapest_price_rule: Option<PriceRule>,
    votes: Vec<Vote>,
    downloads: Vec<Download>,
    links: Vec<Link>,
    media: Vec<Media>,
    cover: Option<Media>,
    property_set: Option<PropertySet>,
    configuration: Vec<ConfiguratorGroup>,
    prices: Vec<Price>,
    cheapest_price: Option<Price>,
}

impl Product {
    pub fn number(&self) -> &OrderNumber {
        self.base.number()
    }

    pub fn base(&self) -> &ListProduct {
        &self.base
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn has_state(&self, state: ProductState) -> bool {
        self.base.has_state(state)
    }

    pub fn related_products(&self) -> &[ListProduct] {
        &self.related_products
    }

    pub fn similar_products(&self) -> &[ListProduct] {
        &self.similar_products
    }

    pub fn price_rules(&self) -> &[PriceRule] {
        &self.price_rules
    }

    pub fn cheapest_price_rule(&self) -> Option<&PriceRule> {
        self.cheapest_price_rule.as_ref()
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// Mean rating over all votes, `None` when the product has no votes.
    pub fn average_points(&self) -> Option<f32> {
        if self.votes.is_empty() {
            return None;
        }
        let total: f32 = self.votes.iter().map(|v| v.points).sum();
        Some(total / self.votes.len() as f32)
    }

    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn media(&self) -> &[Media] {
        &self.media
    }

    pub fn cover(&self) -> Option<&Media> {
        self.cover.as_ref()
    }

    pub fn property_set(&self) -> Option<&PropertySet> {
        self.property_set.as_ref()
    }

    pub fn configuration(&self) -> &[ConfiguratorGroup] {
        &self.configuration
    }

    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    pub fn cheapest_price(&self) -> Option<&Price> {
        self.cheapest_price.as_ref()
    }

    /// Marketing flags; all `false` when none were attached.
    pub fn marketing(&self) -> MarketingAttribute {
        self.base
            .attribute(MarketingAttribute::NAME)
            .map(MarketingAttribute::from_attribute)
            .unwrap_or_default()
    }
}

impl Entity for Product {
    type Id = OrderNumber;

    fn id(&self) -> &Self::Id {
        self.base.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(raw: &str) -> ListProduct {
        let tax = Tax {
            id: 1,
            rate: 19.0,
            name: "19%".to_string(),
        };
        ListProduct::new(1, 10, OrderNumber::new(raw).unwrap(), "Espresso cup", tax)
    }

    fn rule(price: u64) -> PriceRule {
        PriceRule {
            id: price,
            from: 1,
            to: None,
            price,
            pseudo_price: None,
            customer_group: "EK".to_string(),
            unit: None,
        }
    }

    #[test]
    fn fresh_builder_finishes_with_empty_attachments() {
        let product = ProductBuilder::new(base("SW10001")).finish();

        assert_eq!(product.number().as_str(), "SW10001");
        assert!(product.related_products().is_empty());
        assert!(product.similar_products().is_empty());
        assert!(product.price_rules().is_empty());
        assert!(product.cheapest_price_rule().is_none());
        assert!(product.votes().is_empty());
        assert!(product.downloads().is_empty());
        assert!(product.links().is_empty());
        assert!(product.media().is_empty());
        assert!(product.cover().is_none());
        assert!(product.property_set().is_none());
        assert!(product.configuration().is_empty());
        assert!(product.prices().is_empty());
        assert!(product.cheapest_price().is_none());
        assert_eq!(product.marketing(), MarketingAttribute::default());
        assert_eq!(product.average_points(), None);
    }

    #[test]
    fn attachments_and_state_carry_into_the_finished_product() {
        let mut builder = ProductBuilder::new(base("SW10001"));
        builder.add_state(ProductState::PriceCalculated);
        builder.set_price_rules(vec![rule(1000), rule(900)]);
        builder.set_cheapest_price_rule(Some(rule(900)));
        builder.add_attribute(
            MarketingAttribute::NAME,
            MarketingAttribute {
                is_new: true,
                ..MarketingAttribute::default()
            }
            .into(),
        );
        builder.set_prices(vec![Price::new(rule(1000), 1190)]);
        builder.set_cheapest_price(Some(Price::new(rule(900), 1071)));

        let product = builder.finish();

        assert!(product.has_state(ProductState::PriceCalculated));
        assert_eq!(product.price_rules().len(), 2);
        assert_eq!(product.cheapest_price_rule().map(|r| r.price), Some(900));
        assert_eq!(product.prices()[0].calculated, 1190);
        assert_eq!(product.cheapest_price().map(|p| p.calculated), Some(1071));
        assert!(product.marketing().is_new);
        assert_eq!(product.id().as_str(), "SW10001");
    }

    #[test]
    fn average_points_is_the_mean_rating() {
        let vote = |points: f32| Vote {
            id: 1,
            name: "Jane".to_string(),
            headline: "Nice".to_string(),
            comment: String::new(),
            points,
            created_at: chrono::Utc::now(),
            email: None,
            answer: None,
            answered_at: None,
        };
        let mut builder = ProductBuilder::new(base("SW10001"));
        builder.set_votes(vec![vote(5.0), vote(3.0)]);
        let product = builder.finish();
        assert_eq!(product.average_points(), Some(4.0));
    }

    #[test]
    fn finished_product_serializes_base_fields_inline() {
        let product = ProductBuilder::new(base("SW10001")).finish();
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["number"], "SW10001");
        assert_eq!(json["name"], "Espresso cup");
        assert!(json["votes"].as_array().unwrap().is_empty());
    }
}
