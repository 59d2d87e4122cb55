use chrono::{DateTime, Days, Utc};

use storefront_catalog::{CollaboratorError, MarketingService};
use storefront_products::{MarketingAttribute, ProductBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketingConfig {
    /// Products created within this many days count as new.
    pub mark_as_new_days: u32,
    /// Minimum sales for the top-seller flag. Zero disables the flag.
    pub top_seller_threshold: u64,
}

impl Default for MarketingConfig {
    fn default() -> Self {
        Self {
            mark_as_new_days: 30,
            top_seller_threshold: 100,
        }
    }
}

/// Derives the marketing flags from the base record.
#[derive(Debug, Clone, Default)]
pub struct DefaultMarketingService {
    config: MarketingConfig,
    now: Option<DateTime<Utc>>,
}

impl DefaultMarketingService {
    pub fn new(config: MarketingConfig) -> Self {
        Self { config, now: None }
    }

    /// Evaluate against a fixed instant instead of the wall clock.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn config(&self) -> &MarketingConfig {
        &self.config
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

impl MarketingService for DefaultMarketingService {
    fn product_attribute(
        &self,
        product: &ProductBuilder,
    ) -> Result<MarketingAttribute, CollaboratorError> {
        let base = product.base();
        let now = self.now();

        let is_new = match (
            base.created_at(),
            now.date_naive()
                .checked_sub_days(Days::new(u64::from(self.config.mark_as_new_days))),
        ) {
            (Some(created), Some(cutoff)) => created >= cutoff,
            _ => false,
        };
        let threshold = self.config.top_seller_threshold;

        Ok(MarketingAttribute {
            is_new,
            is_top_seller: threshold > 0 && base.sales() >= threshold,
            coming_soon: base.release_date().is_some_and(|release| release > now),
        })
    }
}
