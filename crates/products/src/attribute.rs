//! Extensible key/value attribute bag attached to product records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use storefront_core::ValueObject;

/// Named group of free-form values (e.g. the `core` attribute columns of the
/// data source, or the `marketing` flags computed during aggregation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribute(Map<String, JsonValue>);

impl Attribute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, JsonValue>> for Attribute {
    fn from(value: Map<String, JsonValue>) -> Self {
        Self(value)
    }
}

impl ValueObject for Attribute {}

/// Attribute bag, keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Attribute>);

impl Attributes {
    pub fn insert(&mut self, name: impl Into<String>, attribute: Attribute) {
        self.0.insert(name.into(), attribute);
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Marketing flags of a product, stored under [`MarketingAttribute::NAME`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingAttribute {
    pub is_new: bool,
    pub is_top_seller: bool,
    pub coming_soon: bool,
}

impl MarketingAttribute {
    /// Attribute name the flags are attached under.
    pub const NAME: &'static str = "marketing";

    /// Reads the flags back from an attribute bag entry.
    pub fn from_attribute(attribute: &Attribute) -> Self {
        let flag = |key: &str| attribute.get(key).and_then(JsonValue::as_bool).unwrap_or(false);
        Self {
            is_new: flag("is_new"),
            is_top_seller: flag("is_top_seller"),
            coming_soon: flag("coming_soon"),
        }
    }
}

impl From<MarketingAttribute> for Attribute {
    fn from(value: MarketingAttribute) -> Self {
        Attribute::new()
            .with("is_new", value.is_new)
            .with("is_top_seller", value.is_top_seller)
            .with("coming_soon", value.coming_soon)
    }
}

impl ValueObject for MarketingAttribute {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marketing_flags_survive_the_attribute_bag() {
        let flags = MarketingAttribute {
            is_new: true,
            is_top_seller: false,
            coming_soon: true,
        };
        let attribute: Attribute = flags.into();
        assert_eq!(attribute.len(), 3);
        assert_eq!(MarketingAttribute::from_attribute(&attribute), flags);
    }

    #[test]
    fn missing_marketing_keys_read_as_false() {
        let attribute = Attribute::new().with("is_new", true);
        let flags = MarketingAttribute::from_attribute(&attribute);
        assert!(flags.is_new);
        assert!(!flags.is_top_seller);
        assert!(!flags.coming_soon);
    }

    #[test]
    fn insert_replaces_existing_attribute() {
        let mut attributes = Attributes::default();
        attributes.insert("core", Attribute::new().with("color", "red"));
        attributes.insert("core", Attribute::new().with("color", "blue"));
        assert_eq!(attributes.len(), 1);
        let core = attributes.get("core").unwrap();
        assert_eq!(core.get("color"), Some(&JsonValue::from("blue")));
    }
}
