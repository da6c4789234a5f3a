use std::collections::HashMap;

use crate::model::{CatalogItem, DerivedItem, ItemId, ItemState, ProgressRecord, ProgressStatus};

/// Resolves the display state of every catalog item.
///
/// The catalog must already be sorted by `order`. Unlocking is strictly
/// sequential over the whole catalog: the first item is always reachable,
/// and an item without a progress record opens only when its immediate
/// predecessor is completed. Level never unlocks anything on its own.
#[must_use]
pub fn resolve_states(
    catalog: &[CatalogItem],
    progress: &HashMap<ItemId, ProgressRecord>,
) -> Vec<DerivedItem> {
    let mut resolved = Vec::with_capacity(catalog.len());

    for (position, item) in catalog.iter().enumerate() {
        let record = progress.get(&item.id);
        let state = match record {
            Some(record) => match record.status {
                ProgressStatus::Completed => ItemState::Completed,
                ProgressStatus::Unlocked if record.percentage > 0 => ItemState::InProgress,
                ProgressStatus::Unlocked => ItemState::Available,
            },
            None if position == 0 => ItemState::Available,
            None => {
                let predecessor = &catalog[position - 1];
                if progress
                    .get(&predecessor.id)
                    .is_some_and(ProgressRecord::is_completed)
                {
                    ItemState::Available
                } else {
                    ItemState::Locked
                }
            }
        };

        resolved.push(DerivedItem {
            item: item.clone(),
            state,
            progress: record.map_or(0, |r| r.percentage),
            score: record.map_or(0, |r| r.score),
        });
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::index_progress;
    use crate::model::Level;
    use crate::time::fixed_now;

    fn item(id: &str, order: u32, level: Level) -> CatalogItem {
        CatalogItem::new(id, level, order, format!("Lección {id}")).unwrap()
    }

    fn record(id: &str, status: ProgressStatus, percentage: u32) -> ProgressRecord {
        ProgressRecord::new(ItemId::new(id), status, percentage, 0, Some(fixed_now()))
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            item("1", 1, Level::Basico),
            item("2", 2, Level::Basico),
            item("3", 3, Level::Intermedio),
            item("4", 4, Level::Intermedio),
        ]
    }

    fn states(records: &[ProgressRecord]) -> Vec<ItemState> {
        resolve_states(&catalog(), &index_progress(records))
            .into_iter()
            .map(|item| item.state)
            .collect()
    }

    #[test]
    fn first_item_is_always_reachable() {
        assert_eq!(
            states(&[]),
            vec![
                ItemState::Available,
                ItemState::Locked,
                ItemState::Locked,
                ItemState::Locked
            ]
        );
    }

    #[test]
    fn items_unlock_strictly_in_sequence() {
        let records = vec![
            record("1", ProgressStatus::Completed, 100),
            record("2", ProgressStatus::Completed, 100),
        ];
        assert_eq!(
            states(&records),
            vec![
                ItemState::Completed,
                ItemState::Completed,
                ItemState::Available,
                ItemState::Locked
            ]
        );
    }

    #[test]
    fn level_boundary_does_not_unlock_independently() {
        // Item 3 opens a new level but stays locked until item 2 is done.
        let records = vec![record("1", ProgressStatus::Completed, 100)];
        assert_eq!(
            states(&records),
            vec![
                ItemState::Completed,
                ItemState::Available,
                ItemState::Locked,
                ItemState::Locked
            ]
        );
    }

    #[test]
    fn unlocked_with_progress_becomes_in_progress() {
        let records = vec![
            record("1", ProgressStatus::Completed, 100),
            record("2", ProgressStatus::Unlocked, 45),
        ];
        assert_eq!(states(&records)[1], ItemState::InProgress);
    }

    #[test]
    fn unlocked_without_progress_stays_available() {
        let records = vec![record("1", ProgressStatus::Unlocked, 0)];
        assert_eq!(states(&records)[0], ItemState::Available);
    }

    #[test]
    fn explicit_record_beats_sequential_position() {
        // A record deep in the catalog renders even while earlier items
        // are untouched; the backend decided it exists.
        let records = vec![record("4", ProgressStatus::Unlocked, 10)];
        assert_eq!(
            states(&records),
            vec![
                ItemState::Available,
                ItemState::Locked,
                ItemState::Locked,
                ItemState::InProgress
            ]
        );
    }

    #[test]
    fn derived_items_carry_record_progress_and_score() {
        let records = vec![ProgressRecord::new(
            ItemId::new("1"),
            ProgressStatus::Unlocked,
            60,
            42,
            Some(fixed_now()),
        )];
        let resolved = resolve_states(&catalog(), &index_progress(&records));

        assert_eq!(resolved[0].progress, 60);
        assert_eq!(resolved[0].score, 42);
        assert_eq!(resolved[1].progress, 0);
        assert_eq!(resolved[1].score, 0);
    }
}
