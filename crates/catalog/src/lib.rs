//! Product detail aggregation.
//!
//! [`ProductService`] fetches base product records through a
//! [`ProductGateway`], batch-fetches the satellite data of every collaborator
//! for that batch, and merges everything per order number into finished
//! [`storefront_products::Product`] records.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod gateway;
pub mod service;

pub use collaborators::{
    CheapestPriceService, ConfiguratorService, Contributions, DownloadService,
    GraduatedPriceService, LinkService, MarketingService, MediaService, PriceCalculator,
    PropertyService, RelatedProductsService, SimilarProductsService, VoteService,
};
pub use config::{FetchStrategy, ProductServiceConfig};
pub use error::{Collaborator, CollaboratorError, GatewayError, ProductServiceError};
pub use gateway::{ProductBatch, ProductGateway};
pub use service::{ProductCollaborators, ProductService};
