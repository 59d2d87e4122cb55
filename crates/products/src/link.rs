use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTarget {
    #[default]
    Blank,
    #[serde(rename = "self")]
    SameWindow,
}

/// External link attached to a product (manufacturer page, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: u64,
    pub description: String,
    pub link: String,
    #[serde(default)]
    pub target: LinkTarget,
}

impl ValueObject for Link {}
