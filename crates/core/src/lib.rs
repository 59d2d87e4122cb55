//! `storefront-core`: foundation building blocks shared by the storefront crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod context;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use context::{Currency, CustomerGroup, Shop, ShopContext};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrderNumber, ShopId};
pub use value_object::ValueObject;
