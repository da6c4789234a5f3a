#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod progress_sync;
pub mod translation;

pub use shuar_core::Clock;

pub use error::{SyncError, TranslationError};
pub use progress_sync::{DerivedSnapshot, ProgressSyncService};
pub use translation::{TranslationConfig, TranslationService};
