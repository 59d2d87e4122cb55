use async_trait::async_trait;
use indexmap::IndexMap;

use storefront_core::{OrderNumber, ShopContext};
use storefront_products::ListProduct;

use crate::error::GatewayError;

/// Base product records of one request, keyed by variant order number.
pub type ProductBatch = IndexMap<OrderNumber, ListProduct>;

/// Data-access contract for base product records.
///
/// Implementations run one query per call and never fail for numbers that
/// do not exist; those are simply absent from the returned batch.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Load the base records for `numbers`.
    ///
    /// At most one record per number is returned. When the data source yields
    /// several rows for the same number, the last one wins.
    async fn get_list(
        &self,
        numbers: &[OrderNumber],
        context: &ShopContext,
    ) -> Result<ProductBatch, GatewayError>;

    /// Load a single base record.
    async fn get(
        &self,
        number: &OrderNumber,
        context: &ShopContext,
    ) -> Result<Option<ListProduct>, GatewayError> {
        let mut products = self.get_list(std::slice::from_ref(number), context).await?;
        Ok(products.swap_remove(number))
    }
}
