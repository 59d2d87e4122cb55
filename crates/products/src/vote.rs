use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

/// Customer review of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub id: u64,
    pub name: String,
    pub headline: String,
    pub comment: String,
    /// Rating points (0.0 - 5.0).
    pub points: f32,
    pub created_at: DateTime<Utc>,
    pub email: Option<String>,
    /// Shop owner's reply.
    pub answer: Option<String>,
    pub answered_at: Option<DateTime<Utc>>,
}

impl ValueObject for Vote {}
