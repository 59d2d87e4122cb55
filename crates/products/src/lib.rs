//! Product records for the storefront (pure data, no IO).
//!
//! A [`ListProduct`] is the base record hydrated from the product data source.
//! The aggregation pipeline stages it in a [`ProductBuilder`], attaches the
//! satellite data of every collaborator and finishes it into an immutable
//! [`Product`].

pub mod attribute;
pub mod builder;
pub mod configurator;
pub mod download;
pub mod link;
pub mod media;
pub mod price;
pub mod product;
pub mod property;
pub mod vote;

pub use attribute::{Attribute, Attributes, MarketingAttribute};
pub use builder::{Product, ProductBuilder};
pub use configurator::{ConfiguratorGroup, ConfiguratorOption};
pub use download::Download;
pub use link::{Link, LinkTarget};
pub use media::{Media, Thumbnail};
pub use price::{Price, PriceRule, Tax, Unit};
pub use product::{ListProduct, Manufacturer, ProductState};
pub use property::{PropertyGroup, PropertyOption, PropertySet};
pub use vote::Vote;
