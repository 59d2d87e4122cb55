use std::sync::RwLock;

use async_trait::async_trait;

use storefront_catalog::GatewayError;
use storefront_core::{OrderNumber, ShopContext};

use super::{ProductRow, RowSource, row_key};

/// In-memory row source for tests/dev.
///
/// Returns the stored rows whose key is among the requested numbers, in
/// insertion order. Duplicate keys are kept, as a real query may produce them.
/// Rows without a usable key are returned too; the gateway rejects them.
#[derive(Debug, Default)]
pub struct InMemoryRowSource {
    rows: RwLock<Vec<ProductRow>>,
}

impl InMemoryRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = ProductRow>) -> Self {
        Self {
            rows: RwLock::new(rows.into_iter().collect()),
        }
    }

    pub fn push(&self, row: ProductRow) {
        if let Ok(mut rows) = self.rows.write() {
            rows.push(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RowSource for InMemoryRowSource {
    async fn fetch_rows(
        &self,
        numbers: &[OrderNumber],
        _context: &ShopContext,
    ) -> Result<Vec<ProductRow>, GatewayError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| GatewayError::query("lock poisoned"))?;

        Ok(rows
            .iter()
            .filter(|row| row_key(row).map_or(true, |key| numbers.contains(&key)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value as JsonValue, json};

    use super::*;
    use crate::gateway::VARIANT_ORDER_NUMBER_COLUMN;
    use storefront_core::{Currency, CustomerGroup, Shop, ShopId};

    fn context() -> ShopContext {
        let group = CustomerGroup {
            key: "EK".to_string(),
            name: "Shop customers".to_string(),
            display_gross_prices: true,
            discount: 0.0,
        };
        ShopContext::new(
            Shop {
                id: ShopId::new(1),
                name: "Main".to_string(),
                locale: "en_GB".to_string(),
            },
            Currency {
                id: 1,
                code: "EUR".to_string(),
                factor: 1.0,
            },
            group.clone(),
            group,
        )
    }

    fn row(value: JsonValue) -> ProductRow {
        match value {
            JsonValue::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn numbers(raw: &[&str]) -> Vec<OrderNumber> {
        raw.iter().map(|r| OrderNumber::new(*r).unwrap()).collect()
    }

    #[tokio::test]
    async fn returns_requested_rows_in_storage_order_with_duplicates() {
        let source = InMemoryRowSource::with_rows([
            row(json!({ VARIANT_ORDER_NUMBER_COLUMN: "B", "n": 1 })),
            row(json!({ VARIANT_ORDER_NUMBER_COLUMN: "A", "n": 2 })),
            row(json!({ VARIANT_ORDER_NUMBER_COLUMN: "C", "n": 3 })),
            row(json!({ VARIANT_ORDER_NUMBER_COLUMN: "B", "n": 4 })),
        ]);

        let rows = source.fetch_rows(&numbers(&["A", "B"]), &context()).await.unwrap();

        let order: Vec<i64> = rows.iter().filter_map(|r| r["n"].as_i64()).collect();
        assert_eq!(order, [1, 2, 4]);
    }

    #[tokio::test]
    async fn keyless_rows_are_passed_through() {
        let source = InMemoryRowSource::new();
        source.push(row(json!({ VARIANT_ORDER_NUMBER_COLUMN: "A" })));
        source.push(row(json!({ "__product_name": "no key" })));
        source.push(row(json!({ VARIANT_ORDER_NUMBER_COLUMN: "  " })));

        let rows = source.fetch_rows(&numbers(&["A"]), &context()).await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(source.len(), 3);
    }
}
