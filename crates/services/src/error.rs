//! Shared error types for the services crate.

use thiserror::Error;

use backend::BackendError;

/// Errors emitted by `ProgressSyncService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    #[error("no signed-in user; sync refused before any fetch")]
    IdentityMissing,

    #[error("catalog unavailable")]
    CatalogUnavailable(#[source] BackendError),

    #[error("superseded by a newer sync")]
    Superseded,
}

/// Errors emitted by `TranslationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranslationError {
    #[error("translation API error: {status}")]
    Upstream { status: u16, details: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
