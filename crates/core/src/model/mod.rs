pub mod activity;
pub mod catalog;
pub mod derived;
mod ids;
pub mod progress;
pub mod stats;

pub use activity::ActivityEntry;
pub use catalog::{CatalogError, CatalogItem, CatalogKind, Level};
pub use derived::{DerivedItem, DerivedView, ItemState, LevelGroup};
pub use ids::{ItemId, UserId};
pub use progress::{ProgressError, ProgressRecord, ProgressStatus};
pub use stats::GlobalStats;
