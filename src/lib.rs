//! Listing core of a property-rental marketplace.
//!
//! Backend rows ([`RawRecord`]) are normalized into typed [`Property`] values,
//! searched with [`SearchCriteria`], and written back as sparse patches. The
//! backend itself is injected through [`PropertyBackend`].

pub mod backend;
pub mod models;
pub mod normalize;
pub mod search;
pub mod service;

pub use backend::{BackendConfig, MemoryBackend, PropertyBackend, RestBackend};
pub use models::{Property, PropertyFeatures, PropertyImage, PropertyPatch, RawRecord};
pub use normalize::{normalize, to_raw_format};
pub use search::{filter, SearchCriteria, SearchResult};
pub use service::PropertyService;
