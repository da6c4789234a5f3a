use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use shuar_core::model::{CatalogItem, CatalogKind, ItemId, ProgressRecord, UserId};

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned {code}: {}", message.as_deref().unwrap_or("no message"))]
    Envelope {
        code: String,
        message: Option<String>,
    },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("response is missing {0}")]
    MissingData(&'static str),

    #[error("not found")]
    NotFound,
}

/// Read access to the lesson/story catalogs.
///
/// The backend owns this data; implementations never mutate it.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch the full catalog of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` when the catalog cannot be fetched; callers
    /// treat that as fatal for the whole derived view.
    async fn list_items(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, BackendError>;

    /// Fetch a single catalog item by id.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if missing, or other backend errors.
    async fn get_item(&self, kind: CatalogKind, id: &ItemId)
    -> Result<CatalogItem, BackendError>;
}

/// Read access to a user's progress records.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch all progress records for the user.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on failure; callers degrade to an empty
    /// record set (fail-open) rather than blocking the catalog.
    async fn list_progress(&self, user: &UserId) -> Result<Vec<ProgressRecord>, BackendError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

#[derive(Default)]
struct InMemoryState {
    lessons: Vec<CatalogItem>,
    stories: Vec<CatalogItem>,
    progress: HashMap<UserId, Vec<ProgressRecord>>,
    fail_catalog: bool,
    fail_progress: bool,
}

/// In-memory backend for tests: seedable catalogs and progress, plus
/// per-repository failure switches to exercise the fatal and fail-open
/// paths.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_item(&self, kind: CatalogKind, item: CatalogItem) {
        let mut state = self.state.lock().expect("backend state poisoned");
        match kind {
            CatalogKind::Lessons => state.lessons.push(item),
            CatalogKind::Stories => state.stories.push(item),
        }
    }

    pub fn set_progress(&self, user: UserId, records: Vec<ProgressRecord>) {
        let mut state = self.state.lock().expect("backend state poisoned");
        state.progress.insert(user, records);
    }

    pub fn fail_catalog(&self, fail: bool) {
        self.state.lock().expect("backend state poisoned").fail_catalog = fail;
    }

    pub fn fail_progress(&self, fail: bool) {
        self.state.lock().expect("backend state poisoned").fail_progress = fail;
    }
}

#[async_trait]
impl CatalogRepository for InMemoryBackend {
    async fn list_items(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, BackendError> {
        let state = self.state.lock().expect("backend state poisoned");
        if state.fail_catalog {
            return Err(BackendError::Transport("catalog unavailable".to_string()));
        }
        Ok(match kind {
            CatalogKind::Lessons => state.lessons.clone(),
            CatalogKind::Stories => state.stories.clone(),
        })
    }

    async fn get_item(
        &self,
        kind: CatalogKind,
        id: &ItemId,
    ) -> Result<CatalogItem, BackendError> {
        let items = self.list_items(kind).await?;
        items
            .into_iter()
            .find(|item| &item.id == id)
            .ok_or(BackendError::NotFound)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryBackend {
    async fn list_progress(&self, user: &UserId) -> Result<Vec<ProgressRecord>, BackendError> {
        let state = self.state.lock().expect("backend state poisoned");
        if state.fail_progress {
            return Err(BackendError::Transport("progress unavailable".to_string()));
        }
        Ok(state.progress.get(user).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuar_core::model::{Level, ProgressStatus};

    fn item(id: &str) -> CatalogItem {
        CatalogItem::new(id, Level::Basico, 1, "Saludos").unwrap()
    }

    #[tokio::test]
    async fn in_memory_backend_serves_seeded_catalog() {
        let backend = InMemoryBackend::new();
        backend.push_item(CatalogKind::Lessons, item("l1"));

        let lessons = backend.list_items(CatalogKind::Lessons).await.unwrap();
        assert_eq!(lessons.len(), 1);
        assert!(backend
            .list_items(CatalogKind::Stories)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn get_item_reports_not_found() {
        let backend = InMemoryBackend::new();
        let err = backend
            .get_item(CatalogKind::Lessons, &ItemId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound));
    }

    #[tokio::test]
    async fn failure_switches_trip_the_right_repository() {
        let backend = InMemoryBackend::new();
        backend.fail_catalog(true);

        assert!(backend.list_items(CatalogKind::Lessons).await.is_err());

        let user = UserId::parse("u-1").unwrap();
        backend.set_progress(
            user.clone(),
            vec![ProgressRecord::new(
                ItemId::new("l1"),
                ProgressStatus::Unlocked,
                0,
                0,
                None,
            )],
        );
        assert_eq!(backend.list_progress(&user).await.unwrap().len(), 1);

        backend.fail_progress(true);
        assert!(backend.list_progress(&user).await.is_err());
    }
}
