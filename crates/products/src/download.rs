use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

/// Downloadable file attached to a product (manual, data sheet, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    pub id: u64,
    pub description: String,
    pub file: String,
    /// File size in bytes.
    pub size: u64,
}

impl ValueObject for Download {}
