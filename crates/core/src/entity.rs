//! Entity trait: records that are addressed by a stable key.
//!
//! Every product record in the storefront is an entity keyed by its variant
//! order number; satellite lookups join on that key.

/// Keyed record.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
