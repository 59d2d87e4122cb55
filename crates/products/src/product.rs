use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Entity, OrderNumber, ValueObject};

use crate::attribute::{Attribute, Attributes};
use crate::price::{Tax, Unit};

/// Processing states a product record has passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductState {
    /// Record was staged for price calculation by the aggregation pipeline.
    PriceCalculated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: u64,
    pub name: String,
}

impl ValueObject for Manufacturer {}

/// Base product record (one sellable variant), as hydrated from the product
/// data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListProduct {
    id: u64,
    variant_id: u64,
    number: OrderNumber,
    name: String,
    short_description: String,
    long_description: String,
    additional_text: Option<String>,
    manufacturer: Option<Manufacturer>,
    tax: Tax,
    unit: Option<Unit>,
    ean: Option<String>,
    stock: i64,
    min_purchase: u32,
    sales: u64,
    close_out: bool,
    shipping_free: bool,
    release_date: Option<DateTime<Utc>>,
    created_at: Option<NaiveDate>,
    states: BTreeSet<ProductState>,
    attributes: Attributes,
}

impl ListProduct {
    /// Minimal record; the remaining fields start empty and are filled with the
    /// `with_*` methods.
    pub fn new(
        id: u64,
        variant_id: u64,
        number: OrderNumber,
        name: impl Into<String>,
        tax: Tax,
    ) -> Self {
        Self {
            id,
            variant_id,
            number,
            name: name.into(),
            short_description: String::new(),
            long_description: String::new(),
            additional_text: None,
            manufacturer: None,
            tax,
            unit: None,
            ean: None,
            stock: 0,
            min_purchase: 1,
            sales: 0,
            close_out: false,
            shipping_free: false,
            release_date: None,
            created_at: None,
            states: BTreeSet::new(),
            attributes: Attributes::default(),
        }
    }

    pub fn with_descriptions(mut self, short: impl Into<String>, long: impl Into<String>) -> Self {
        self.short_description = short.into();
        self.long_description = long.into();
        self
    }

    pub fn with_additional_text(mut self, text: impl Into<String>) -> Self {
        self.additional_text = Some(text.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: Manufacturer) -> Self {
        self.manufacturer = Some(manufacturer);
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_ean(mut self, ean: impl Into<String>) -> Self {
        self.ean = Some(ean.into());
        self
    }

    pub fn with_stock(mut self, stock: i64, min_purchase: u32) -> Self {
        self.stock = stock;
        self.min_purchase = min_purchase.max(1);
        self
    }

    pub fn with_sales(mut self, sales: u64) -> Self {
        self.sales = sales;
        self
    }

    pub fn with_flags(mut self, close_out: bool, shipping_free: bool) -> Self {
        self.close_out = close_out;
        self.shipping_free = shipping_free;
        self
    }

    pub fn with_release_date(mut self, release_date: DateTime<Utc>) -> Self {
        self.release_date = Some(release_date);
        self
    }

    pub fn with_created_at(mut self, created_at: NaiveDate) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    pub fn product_id(&self) -> u64 {
        self.id
    }

    pub fn variant_id(&self) -> u64 {
        self.variant_id
    }

    pub fn number(&self) -> &OrderNumber {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    pub fn additional_text(&self) -> Option<&str> {
        self.additional_text.as_deref()
    }

    pub fn manufacturer(&self) -> Option<&Manufacturer> {
        self.manufacturer.as_ref()
    }

    pub fn tax(&self) -> &Tax {
        &self.tax
    }

    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    pub fn ean(&self) -> Option<&str> {
        self.ean.as_deref()
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn min_purchase(&self) -> u32 {
        self.min_purchase
    }

    pub fn sales(&self) -> u64 {
        self.sales
    }

    pub fn is_close_out(&self) -> bool {
        self.close_out
    }

    pub fn is_shipping_free(&self) -> bool {
        self.shipping_free
    }

    pub fn release_date(&self) -> Option<DateTime<Utc>> {
        self.release_date
    }

    pub fn created_at(&self) -> Option<NaiveDate> {
        self.created_at
    }

    /// Close-out products without stock cannot be bought.
    pub fn is_available(&self) -> bool {
        !self.close_out || self.stock >= i64::from(self.min_purchase)
    }

    pub fn has_state(&self, state: ProductState) -> bool {
        self.states.contains(&state)
    }

    pub fn states(&self) -> &BTreeSet<ProductState> {
        &self.states
    }

    pub fn add_state(&mut self, state: ProductState) {
        self.states.insert(state);
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Adds (or replaces) a named attribute.
    pub fn add_attribute(&mut self, name: impl Into<String>, attribute: Attribute) {
        self.attributes.insert(name, attribute);
    }
}

impl Entity for ListProduct {
    type Id = OrderNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }
}
