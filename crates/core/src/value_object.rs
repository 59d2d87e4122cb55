//! Value object trait: equality by value, not identity.
//!
//! Prices, taxes, media descriptors and the other attachments of a product
//! record carry no identity of their own inside the aggregation pipeline; two
//! attachments with the same values are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** once attached to a finished product and
/// **compared by value**. The bounds keep them cheap to clone into per-record
/// attachments and easy to assert on in tests.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Tax {
///     id: u32,
///     rate: f64,
/// }
///
/// impl ValueObject for Tax {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
