//! Failure taxonomy of the aggregation pipeline.
//!
//! - A requested number missing from the base fetch is **not** an error; it is
//!   dropped from the result.
//! - A number missing from a collaborator's mapping is **not** an error; the
//!   attachment takes its empty default.
//! - Everything below is a hard failure that aborts the whole request.

use thiserror::Error;

/// Data-access failure while loading base product records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The underlying query could not be executed.
    #[error("product query failed: {0}")]
    Query(String),

    /// A result row carried no usable key column.
    #[error("result row without key column '{column}'")]
    MissingKey { column: String },

    /// A result row could not be mapped into a product record.
    #[error("failed to hydrate product row: {0}")]
    Hydration(String),
}

impl GatewayError {
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn hydration(msg: impl Into<String>) -> Self {
        Self::Hydration(msg.into())
    }
}

/// Capability a collaborator supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    GraduatedPrices,
    CheapestPrice,
    Votes,
    RelatedProducts,
    SimilarProducts,
    Downloads,
    Links,
    Media,
    Covers,
    Properties,
    Configuration,
    Marketing,
    PriceCalculation,
}

impl Collaborator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collaborator::GraduatedPrices => "graduated_prices",
            Collaborator::CheapestPrice => "cheapest_price",
            Collaborator::Votes => "votes",
            Collaborator::RelatedProducts => "related_products",
            Collaborator::SimilarProducts => "similar_products",
            Collaborator::Downloads => "downloads",
            Collaborator::Links => "links",
            Collaborator::Media => "media",
            Collaborator::Covers => "covers",
            Collaborator::Properties => "properties",
            Collaborator::Configuration => "configuration",
            Collaborator::Marketing => "marketing",
            Collaborator::PriceCalculation => "price_calculation",
        }
    }
}

impl core::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A batch or per-record collaborator call failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{collaborator} lookup failed: {message}")]
pub struct CollaboratorError {
    pub collaborator: Collaborator,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(collaborator: Collaborator, message: impl Into<String>) -> Self {
        Self {
            collaborator,
            message: message.into(),
        }
    }
}

/// Error returned by [`crate::ProductService`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductServiceError {
    #[error(transparent)]
    DataAccess(#[from] GatewayError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
