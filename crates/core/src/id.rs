//! Strongly-typed identifiers used across the storefront.

use core::borrow::Borrow;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DomainError, DomainResult};

/// Variant-level order number.
///
/// The join key across the product data source and every satellite lookup.
/// Always non-empty and free of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Parse and normalize an order number.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("OrderNumber: must not be empty"));
        }
        if trimmed.len() == value.len() {
            Ok(Self(value))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for OrderNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OrderNumber {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderNumber> for String {
    fn from(value: OrderNumber) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for OrderNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Identifier of a shop (sales channel).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(u32);

impl ShopId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ShopId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ShopId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn order_number_trims_surrounding_whitespace() {
        let number = OrderNumber::new("  SW10001 ").unwrap();
        assert_eq!(number.as_str(), "SW10001");
    }

    #[test]
    fn order_number_rejects_blank_input() {
        let err = OrderNumber::new("   ").unwrap_err();
        match err {
            DomainError::InvalidId(_) => {}
            _ => panic!("Expected InvalidId error for blank order number"),
        }
    }

    #[test]
    fn order_number_map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(OrderNumber::new("SW10002").unwrap(), 1);
        assert_eq!(map.get("SW10002"), Some(&1));
        assert_eq!(map.get("SW10003"), None);
    }

    #[test]
    fn order_number_deserialize_validates() {
        let ok: OrderNumber = serde_json::from_str("\"SW10004\"").unwrap();
        assert_eq!(ok.to_string(), "SW10004");
        assert_eq!(String::from(ok), "SW10004");

        let err = serde_json::from_str::<OrderNumber>("\"\"");
        assert!(err.is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: parsing is idempotent over its own output.
            #[test]
            fn parse_is_idempotent(raw in "[ ]{0,3}[A-Za-z0-9.\\-]{1,30}[ ]{0,3}") {
                let once = OrderNumber::new(raw.clone()).unwrap();
                let twice = OrderNumber::new(once.as_str()).unwrap();
                prop_assert_eq!(&once, &twice);
                prop_assert_eq!(once.as_str(), raw.trim());
            }
        }
    }
}
