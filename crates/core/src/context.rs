//! Request-scoped storefront context.
//!
//! A `ShopContext` travels unchanged through every lookup of a product
//! request. The aggregation pipeline never inspects it; collaborators read the
//! currency and customer group to select and calculate prices.

use serde::{Deserialize, Serialize};

use crate::id::ShopId;

/// Shop (sales channel) the request is served for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    /// Locale code, e.g. `de_DE`.
    pub locale: String,
}

/// Currency of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: u32,
    /// ISO currency code (e.g. "EUR", "USD").
    pub code: String,
    /// Conversion factor relative to the shop's base currency.
    pub factor: f64,
}

/// Customer group of the requesting customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerGroup {
    /// Group key, e.g. "EK" for end customers.
    pub key: String,
    pub name: String,
    /// Whether prices are displayed including tax.
    pub display_gross_prices: bool,
    /// Percentage discount granted to the group (0.0 - 100.0).
    pub discount: f64,
}

/// Immutable request context: shop, currency and customer groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopContext {
    shop: Shop,
    currency: Currency,
    current_customer_group: CustomerGroup,
    fallback_customer_group: CustomerGroup,
}

impl ShopContext {
    pub fn new(
        shop: Shop,
        currency: Currency,
        current_customer_group: CustomerGroup,
        fallback_customer_group: CustomerGroup,
    ) -> Self {
        Self {
            shop,
            currency,
            current_customer_group,
            fallback_customer_group,
        }
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn current_customer_group(&self) -> &CustomerGroup {
        &self.current_customer_group
    }

    /// Group whose prices apply when the current group has none.
    pub fn fallback_customer_group(&self) -> &CustomerGroup {
        &self.fallback_customer_group
    }
}
