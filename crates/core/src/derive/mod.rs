//! Pure derivation of display state from catalog + progress.
//!
//! Everything here is synchronous and deterministic: given the same
//! fetched inputs and the same `now`, the output is identical. Fetch
//! failures are handled by callers; once inputs exist, derivation cannot
//! fail.

mod activity;
mod streak;
mod unlock;

pub use activity::recent_activity;
pub use streak::streak_days;
pub use unlock::resolve_states;

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::model::{
    CatalogItem, DerivedItem, DerivedView, GlobalStats, ItemId, ItemState, Level, LevelGroup,
    ProgressRecord,
};

//
// ─── PROGRESS INDEX ────────────────────────────────────────────────────────────
//

/// Indexes progress records by item id.
///
/// The backend should guarantee one record per (user, item); when it does
/// not, the freshest `updated_at` wins, and a tie (including two missing
/// timestamps) goes to the later array position.
#[must_use]
pub fn index_progress(records: &[ProgressRecord]) -> HashMap<ItemId, ProgressRecord> {
    let mut index: HashMap<ItemId, ProgressRecord> = HashMap::new();
    for record in records {
        match index.get(&record.item_id) {
            Some(existing) if record.updated_at < existing.updated_at => {}
            _ => {
                index.insert(record.item_id.clone(), record.clone());
            }
        }
    }
    index
}

//
// ─── FULL DERIVATION ───────────────────────────────────────────────────────────
//

/// Merges a catalog and a user's progress records into the display snapshot.
///
/// The catalog is sorted by `order` (ties broken by id so the result is
/// stable regardless of backend response order) before sequential-unlock
/// resolution runs.
#[must_use]
pub fn derive_view(
    mut catalog: Vec<CatalogItem>,
    records: &[ProgressRecord],
    now: DateTime<Utc>,
) -> DerivedView {
    catalog.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));

    let progress = index_progress(records);
    let items = resolve_states(&catalog, &progress);
    let stats = global_stats(&items, records, now);
    let recent = recent_activity(records, &catalog, now);
    let groups = group_by_level(items);

    DerivedView {
        groups,
        stats,
        recent,
    }
}

/// Computes aggregate statistics over already-resolved items.
// Rounding small counts to a whole percent; the casts cannot overflow.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn global_stats(
    items: &[DerivedItem],
    records: &[ProgressRecord],
    now: DateTime<Utc>,
) -> GlobalStats {
    let total = items.len();
    let completed = items.iter().filter(|item| item.is_completed()).count();
    let percentage = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    };

    GlobalStats {
        completed,
        total,
        percentage,
        level_label: level_label(items),
        streak_days: streak_days(records, now.date_naive()),
    }
}

/// Maps the user's current working level to its display label.
///
/// The "active" item is the first available or in-progress item in
/// catalog order; with none, the last completed item; with none of those,
/// the first item of the catalog.
#[must_use]
pub fn level_label(items: &[DerivedItem]) -> String {
    let focus = items
        .iter()
        .find(|item| matches!(item.state, ItemState::InProgress | ItemState::Available))
        .or_else(|| items.iter().rev().find(|item| item.is_completed()))
        .or_else(|| items.first());

    match focus {
        Some(item) => match &item.item.level {
            Level::Basico => "Nivel 1 • Fundamentos".to_string(),
            Level::Intermedio => "Nivel 2 • Intermedio".to_string(),
            Level::Avanzado => "Nivel 3 • Avanzado".to_string(),
            Level::Other(raw) => raw.clone(),
        },
        None => String::new(),
    }
}

/// Groups resolved items by level, preserving catalog order inside each
/// group and ranking groups Básico → Intermedio → Avanzado → other.
#[must_use]
pub fn group_by_level(items: Vec<DerivedItem>) -> Vec<LevelGroup> {
    let mut groups: Vec<LevelGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|group| group.level == item.item.level) {
            Some(group) => group.items.push(item),
            None => groups.push(LevelGroup {
                level: item.item.level.clone(),
                items: vec![item],
            }),
        }
    }
    groups.sort_by_key(|group| group.level.rank());
    groups
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
