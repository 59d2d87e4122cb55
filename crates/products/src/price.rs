//! Price rules, calculated prices and the tax/unit data they depend on.
//!
//! Amounts are in the smallest currency unit (e.g. cents) of the shop's base
//! currency until a price calculator converts them for the request context.

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    pub id: u32,
    /// Tax rate in percent (e.g. 19.0).
    pub rate: f64,
    pub name: String,
}

impl ValueObject for Tax {}

/// Packaging / reference unit used for base-price display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u32,
    pub name: String,
    pub unit: String,
    /// Content of one purchasable item, expressed in `unit`.
    pub purchase_unit: Option<f64>,
    /// Quantity the reference price is expressed for (e.g. 1 litre).
    pub reference_unit: Option<f64>,
    pub pack_unit: Option<String>,
}

impl ValueObject for Unit {}

/// Raw (net, base currency) price rule for a quantity range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRule {
    pub id: u64,
    /// First quantity the rule applies to.
    pub from: u32,
    /// Last quantity the rule applies to (`None` = open ended).
    pub to: Option<u32>,
    pub price: u64,
    pub pseudo_price: Option<u64>,
    /// Key of the customer group the rule was defined for.
    pub customer_group: String,
    pub unit: Option<Unit>,
}

impl PriceRule {
    pub fn applies_to(&self, quantity: u32) -> bool {
        quantity >= self.from && self.to.is_none_or(|to| quantity <= to)
    }
}

impl ValueObject for PriceRule {}

/// Price calculated for the request context from a [`PriceRule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub rule: PriceRule,
    pub calculated: u64,
    pub calculated_pseudo: Option<u64>,
    /// Price per reference unit, when the rule carries unit data.
    pub calculated_reference: Option<u64>,
}

impl Price {
    pub fn new(rule: PriceRule, calculated: u64) -> Self {
        Self {
            rule,
            calculated,
            calculated_pseudo: None,
            calculated_reference: None,
        }
    }
}

impl ValueObject for Price {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rule(from: u32, to: Option<u32>) -> PriceRule {
        PriceRule {
            id: 1,
            from,
            to,
            price: 1000,
            pseudo_price: None,
            customer_group: "EK".to_string(),
            unit: None,
        }
    }

    #[test]
    fn bounded_rule_covers_its_range() {
        let r = rule(1, Some(9));
        assert!(r.applies_to(1));
        assert!(r.applies_to(9));
        assert!(!r.applies_to(10));
    }

    #[test]
    fn open_rule_covers_everything_above_from() {
        let r = rule(10, None);
        assert!(!r.applies_to(9));
        assert!(r.applies_to(10));
        assert!(r.applies_to(u32::MAX));
    }

    proptest! {
        #[test]
        fn applies_exactly_within_bounds(
            from in 0u32..1000,
            len in 0u32..1000,
            quantity in 0u32..3000,
        ) {
            let to = from + len;
            let r = rule(from, Some(to));
            prop_assert_eq!(r.applies_to(quantity), (from..=to).contains(&quantity));
        }
    }
}
