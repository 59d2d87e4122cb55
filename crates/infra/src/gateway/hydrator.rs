//! Row hydration: raw product rows into [`ListProduct`] records.
//!
//! Column values may arrive typed (JSON numbers/booleans, e.g. from
//! `row_to_json`) or as strings (e.g. from drivers that stringify every
//! column); both are accepted.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value as JsonValue;

use storefront_catalog::GatewayError;
use storefront_core::OrderNumber;
use storefront_products::{Attribute, ListProduct, Manufacturer, Tax, Unit};

use super::{ProductRow, VARIANT_ORDER_NUMBER_COLUMN};

/// Maps one raw row into a base product record.
pub trait ProductHydrator: Send + Sync {
    fn hydrate_product(&self, row: &ProductRow) -> Result<ListProduct, GatewayError>;
}

/// Prefix of free-form attribute columns.
const ATTRIBUTE_PREFIX: &str = "__attribute_";

/// Attribute name the free-form attribute columns are collected under.
pub const CORE_ATTRIBUTE: &str = "core";

/// Hydrator for the conventional `__<table>_<column>` row layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProductHydrator;

impl ProductHydrator for JsonProductHydrator {
    fn hydrate_product(&self, row: &ProductRow) -> Result<ListProduct, GatewayError> {
        let number = OrderNumber::new(required_str(row, VARIANT_ORDER_NUMBER_COLUMN)?)
            .map_err(|e| GatewayError::hydration(e.to_string()))?;

        let tax = Tax {
            id: required_u32(row, "__tax_id")?,
            rate: required_f64(row, "__tax_tax")?,
            name: optional_str(row, "__tax_description").unwrap_or_default(),
        };

        let mut product = ListProduct::new(
            required_u64(row, "__product_id")?,
            required_u64(row, "__variant_id")?,
            number,
            required_str(row, "__product_name")?,
            tax,
        )
        .with_descriptions(
            optional_str(row, "__product_description").unwrap_or_default(),
            optional_str(row, "__product_description_long").unwrap_or_default(),
        )
        .with_stock(
            optional_i64(row, "__variant_instock")?.unwrap_or(0),
            optional_u32(row, "__variant_minpurchase")?.unwrap_or(1),
        )
        .with_sales(optional_u64(row, "__product_sales")?.unwrap_or(0))
        .with_flags(
            optional_bool(row, "__product_laststock")?.unwrap_or(false),
            optional_bool(row, "__variant_shippingfree")?.unwrap_or(false),
        );

        let additional_text =
            optional_str(row, "__variant_additionaltext").filter(|t| !t.is_empty());
        if let Some(text) = additional_text {
            product = product.with_additional_text(text);
        }
        if let Some(ean) = optional_str(row, "__variant_ean").filter(|e| !e.is_empty()) {
            product = product.with_ean(ean);
        }
        if let Some(id) = optional_u64(row, "__manufacturer_id")? {
            product = product.with_manufacturer(Manufacturer {
                id,
                name: optional_str(row, "__manufacturer_name").unwrap_or_default(),
            });
        }
        if let Some(id) = optional_u32(row, "__unit_id")? {
            product = product.with_unit(Unit {
                id,
                name: optional_str(row, "__unit_description").unwrap_or_default(),
                unit: optional_str(row, "__unit_unit").unwrap_or_default(),
                purchase_unit: optional_f64(row, "__unit_purchaseunit")?,
                reference_unit: optional_f64(row, "__unit_referenceunit")?,
                pack_unit: optional_str(row, "__unit_packunit"),
            });
        }
        if let Some(release) = optional_datetime(row, "__variant_releasedate")? {
            product = product.with_release_date(release);
        }
        if let Some(created) = optional_date(row, "__product_datum")? {
            product = product.with_created_at(created);
        }

        let attribute: Attribute = row
            .iter()
            .filter_map(|(column, value)| {
                column
                    .strip_prefix(ATTRIBUTE_PREFIX)
                    .map(|name| (name.to_string(), value.clone()))
            })
            .collect::<serde_json::Map<_, _>>()
            .into();
        if !attribute.is_empty() {
            product.add_attribute(CORE_ATTRIBUTE, attribute);
        }

        Ok(product)
    }
}

fn present<'a>(row: &'a ProductRow, column: &str) -> Option<&'a JsonValue> {
    row.get(column).filter(|v| !v.is_null())
}

fn invalid(column: &str, value: &JsonValue, expected: &str) -> GatewayError {
    GatewayError::hydration(format!("column '{column}': expected {expected}, got {value}"))
}

fn missing(column: &str) -> GatewayError {
    GatewayError::hydration(format!("missing required column '{column}'"))
}

fn optional_str(row: &ProductRow, column: &str) -> Option<String> {
    match present(row, column)? {
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn required_str(row: &ProductRow, column: &str) -> Result<String, GatewayError> {
    optional_str(row, column).ok_or_else(|| missing(column))
}

fn optional_u64(row: &ProductRow, column: &str) -> Result<Option<u64>, GatewayError> {
    let Some(value) = present(row, column) else {
        return Ok(None);
    };
    let parsed = match value {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.map(Some).ok_or_else(|| invalid(column, value, "unsigned integer"))
}

fn required_u64(row: &ProductRow, column: &str) -> Result<u64, GatewayError> {
    optional_u64(row, column)?.ok_or_else(|| missing(column))
}

fn optional_u32(row: &ProductRow, column: &str) -> Result<Option<u32>, GatewayError> {
    optional_u64(row, column)?
        .map(|v| u32::try_from(v).map_err(|_| invalid(column, &JsonValue::from(v), "u32")))
        .transpose()
}

fn required_u32(row: &ProductRow, column: &str) -> Result<u32, GatewayError> {
    optional_u32(row, column)?.ok_or_else(|| missing(column))
}

fn optional_i64(row: &ProductRow, column: &str) -> Result<Option<i64>, GatewayError> {
    let Some(value) = present(row, column) else {
        return Ok(None);
    };
    let parsed = match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.map(Some).ok_or_else(|| invalid(column, value, "integer"))
}

fn optional_f64(row: &ProductRow, column: &str) -> Result<Option<f64>, GatewayError> {
    let Some(value) = present(row, column) else {
        return Ok(None);
    };
    let parsed = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.map(Some).ok_or_else(|| invalid(column, value, "number"))
}

fn required_f64(row: &ProductRow, column: &str) -> Result<f64, GatewayError> {
    optional_f64(row, column)?.ok_or_else(|| missing(column))
}

fn optional_bool(row: &ProductRow, column: &str) -> Result<Option<bool>, GatewayError> {
    let Some(value) = present(row, column) else {
        return Ok(None);
    };
    let parsed = match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::Number(n) => n.as_i64().map(|i| i != 0),
        JsonValue::String(s) => match s.trim() {
            "1" | "true" => Some(true),
            "0" | "false" | "" => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.map(Some).ok_or_else(|| invalid(column, value, "boolean"))
}

fn optional_date(row: &ProductRow, column: &str) -> Result<Option<NaiveDate>, GatewayError> {
    let Some(value) = present(row, column) else {
        return Ok(None);
    };
    let JsonValue::String(s) = value else {
        return Err(invalid(column, value, "date"));
    };
    // Timestamps are cut to their date part.
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| invalid(column, value, "date"))
}

fn optional_datetime(
    row: &ProductRow,
    column: &str,
) -> Result<Option<DateTime<Utc>>, GatewayError> {
    let Some(value) = present(row, column) else {
        return Ok(None);
    };
    let JsonValue::String(s) = value else {
        return Err(invalid(column, value, "date or timestamp"));
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Some(dt.and_utc()))
        .ok_or_else(|| invalid(column, value, "date or timestamp"))
}
