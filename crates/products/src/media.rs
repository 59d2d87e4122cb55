use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub path: String,
}

/// Image or file assigned to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub path: String,
    pub extension: String,
    /// Whether this is the product's main (preview) image.
    pub preview: bool,
    pub thumbnails: Vec<Thumbnail>,
}

impl Media {
    /// Smallest thumbnail at least `width` pixels wide.
    pub fn thumbnail_for_width(&self, width: u32) -> Option<&Thumbnail> {
        self.thumbnails
            .iter()
            .filter(|t| t.width >= width)
            .min_by_key(|t| t.width)
    }
}

impl ValueObject for Media {}
