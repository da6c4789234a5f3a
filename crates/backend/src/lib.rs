#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod http;
pub mod identity;
pub mod repository;

pub use http::{HttpBackend, HttpBackendConfig};
pub use identity::{IdentityProvider, SessionFile, StaticIdentity};
pub use repository::{BackendError, CatalogRepository, InMemoryBackend, ProgressRepository};
