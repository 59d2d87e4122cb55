//! Row-based product gateway.
//!
//! A [`RowSource`] runs the (externally built) product query and returns raw
//! rows; a [`ProductHydrator`] turns each row into a [`ListProduct`]. The
//! gateway itself only reads the key column of a row.

pub mod hydrator;
pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexSet;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use storefront_catalog::{GatewayError, ProductBatch, ProductGateway};
use storefront_core::{OrderNumber, ShopContext};
use storefront_products::ListProduct;

pub use hydrator::{JsonProductHydrator, ProductHydrator};
pub use in_memory::InMemoryRowSource;
pub use postgres::PostgresRowSource;

/// Raw product row, column name to value.
pub type ProductRow = Map<String, JsonValue>;

/// Column carrying the variant order number each row is keyed by.
pub const VARIANT_ORDER_NUMBER_COLUMN: &str = "__variant_ordernumber";

/// Executes the product query for a set of order numbers.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Rows for `numbers` (deduplicated by the caller). Rows are returned as
    /// produced by the store; several rows may share a key.
    async fn fetch_rows(
        &self,
        numbers: &[OrderNumber],
        context: &ShopContext,
    ) -> Result<Vec<ProductRow>, GatewayError>;
}

#[async_trait]
impl<S> RowSource for Arc<S>
where
    S: RowSource + ?Sized,
{
    async fn fetch_rows(
        &self,
        numbers: &[OrderNumber],
        context: &ShopContext,
    ) -> Result<Vec<ProductRow>, GatewayError> {
        (**self).fetch_rows(numbers, context).await
    }
}

/// Reads the order number key of a row.
pub fn row_key(row: &ProductRow) -> Result<OrderNumber, GatewayError> {
    let missing = || GatewayError::MissingKey {
        column: VARIANT_ORDER_NUMBER_COLUMN.to_string(),
    };
    let raw = match row.get(VARIANT_ORDER_NUMBER_COLUMN) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => return Err(missing()),
    };
    OrderNumber::new(raw).map_err(|_| missing())
}

/// [`ProductGateway`] over a [`RowSource`] and a [`ProductHydrator`].
#[derive(Debug, Clone)]
pub struct RowProductGateway<R, H = JsonProductHydrator> {
    rows: R,
    hydrator: H,
}

impl<R> RowProductGateway<R, JsonProductHydrator> {
    pub fn new(rows: R) -> Self {
        Self {
            rows,
            hydrator: JsonProductHydrator,
        }
    }
}

impl<R, H> RowProductGateway<R, H> {
    pub fn with_hydrator(rows: R, hydrator: H) -> Self {
        Self { rows, hydrator }
    }
}

#[async_trait]
impl<R, H> ProductGateway for RowProductGateway<R, H>
where
    R: RowSource,
    H: ProductHydrator,
{
    async fn get_list(
        &self,
        numbers: &[OrderNumber],
        context: &ShopContext,
    ) -> Result<ProductBatch, GatewayError> {
        let requested: IndexSet<&OrderNumber> = numbers.iter().collect();
        if requested.is_empty() {
            return Ok(ProductBatch::new());
        }

        let unique: Vec<OrderNumber> = requested.iter().map(|n| (*n).clone()).collect();
        let rows = self.rows.fetch_rows(&unique, context).await?;

        let mut products: ProductBatch = ProductBatch::with_capacity(requested.len());
        for row in &rows {
            let key = row_key(row)?;
            if !requested.contains(&key) {
                debug!(number = %key, "ignoring row for a number that was not requested");
                continue;
            }
            let product: ListProduct = self.hydrator.hydrate_product(row)?;
            // Last row for a key wins.
            products.insert(key, product);
        }

        debug!(rows = rows.len(), products = products.len(), "hydrated product rows");
        Ok(products)
    }
}
