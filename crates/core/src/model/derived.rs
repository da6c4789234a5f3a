use serde::Serialize;
use std::fmt;

use crate::model::activity::ActivityEntry;
use crate::model::catalog::{CatalogItem, Level};
use crate::model::stats::GlobalStats;

//
// ─── ITEM STATE ────────────────────────────────────────────────────────────────
//

/// Display state of one catalog item after merging catalog and progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemState {
    Locked,
    Available,
    InProgress,
    Completed,
}

impl ItemState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ItemState::Locked => "locked",
            ItemState::Available => "available",
            ItemState::InProgress => "in-progress",
            ItemState::Completed => "completed",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── DERIVED ITEM ──────────────────────────────────────────────────────────────
//

/// A catalog item annotated with the user's unlock/completion state.
///
/// Computed, never persisted; recomputed on every sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub state: ItemState,
    pub progress: u8,
    pub score: u32,
}

impl DerivedItem {
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state == ItemState::Locked
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.state == ItemState::InProgress
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == ItemState::Completed
    }
}

//
// ─── LEVEL GROUP ───────────────────────────────────────────────────────────────
//

/// Items of one level, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelGroup {
    pub level: Level,
    pub items: Vec<DerivedItem>,
}

//
// ─── DERIVED VIEW ──────────────────────────────────────────────────────────────
//

/// The complete derived snapshot handed to consumers: leveled item groups,
/// aggregate statistics, and the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedView {
    pub groups: Vec<LevelGroup>,
    pub stats: GlobalStats,
    pub recent: Vec<ActivityEntry>,
}

impl DerivedView {
    /// All derived items across groups, in display order.
    pub fn items(&self) -> impl Iterator<Item = &DerivedItem> {
        self.groups.iter().flat_map(|group| group.items.iter())
    }
}
