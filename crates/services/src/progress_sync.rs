use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use backend::{CatalogRepository, IdentityProvider, ProgressRepository};
use shuar_core::Clock;
use shuar_core::derive::derive_view;
use shuar_core::model::{CatalogKind, DerivedView};

use crate::error::SyncError;

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// One committed sync result.
///
/// Immutable; a new sync produces a new snapshot rather than mutating
/// this one. `progress_degraded` flags that progress history could not
/// be fetched and the view was derived fail-open from an empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedSnapshot {
    pub view: DerivedView,
    pub progress_degraded: bool,
    pub generation: u64,
}

//
// ─── SYNC SERVICE ──────────────────────────────────────────────────────────────
//

/// Fetches catalog + progress and derives the display snapshot.
///
/// The two fetches run concurrently and both settle before derivation.
/// Each invocation claims a generation token; if a newer invocation
/// starts before this one commits, the older result is discarded as
/// `Superseded`. That same guard covers consumer teardown: a caller that
/// goes away simply never observes a committed snapshot, so no true
/// network cancellation is needed.
pub struct ProgressSyncService {
    clock: Clock,
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
    identity: Arc<dyn IdentityProvider>,
    generation: AtomicU64,
}

impl ProgressSyncService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        progress: Arc<dyn ProgressRepository>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            clock: Clock::default_clock(),
            catalog,
            progress,
            identity,
            generation: AtomicU64::new(0),
        }
    }

    /// Replaces the clock, e.g. with a fixed one in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Loads the catalog and the user's progress, then derives the
    /// leveled, sequentially-unlocked view with aggregate statistics.
    ///
    /// The catalog fetch is fatal on failure. The progress fetch is not:
    /// derivation proceeds from an empty record set so the catalog stays
    /// browsable, and the snapshot is flagged as degraded.
    ///
    /// # Errors
    ///
    /// - `SyncError::IdentityMissing` when no user is signed in; no
    ///   network call is issued.
    /// - `SyncError::CatalogUnavailable` when the catalog fetch fails.
    /// - `SyncError::Superseded` when a newer sync started before this
    ///   one could commit.
    pub async fn load_and_derive(
        &self,
        kind: CatalogKind,
    ) -> Result<DerivedSnapshot, SyncError> {
        let Some(user) = self.identity.current_user() else {
            return Err(SyncError::IdentityMissing);
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (catalog, progress) = tokio::join!(
            self.catalog.list_items(kind),
            self.progress.list_progress(&user)
        );

        let catalog = catalog.map_err(SyncError::CatalogUnavailable)?;
        let (records, progress_degraded) = match progress {
            Ok(records) => (records, false),
            Err(err) => {
                warn!(user = %user, %err, "progress fetch failed; deriving without history");
                (Vec::new(), true)
            }
        };

        // Commit-time check: a newer invocation owns the state now.
        if self.generation.load(Ordering::SeqCst) != generation {
            return Err(SyncError::Superseded);
        }

        Ok(DerivedSnapshot {
            view: derive_view(catalog, &records, self.clock.now()),
            progress_degraded,
            generation,
        })
    }
}
