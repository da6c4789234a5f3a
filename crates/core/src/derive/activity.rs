use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::model::{ActivityEntry, CatalogItem, ItemId, ProgressRecord};
use crate::timefmt::relative_label;

/// Feed length cap.
const MAX_RECENT: usize = 5;

/// Builds the recent-activity feed from progress records.
///
/// Records without a timestamp are skipped, the rest sorted newest first
/// and cut to five *before* the catalog join, so an entry whose item no
/// longer exists shortens the feed rather than pulling in older records.
#[must_use]
pub fn recent_activity(
    records: &[ProgressRecord],
    catalog: &[CatalogItem],
    now: DateTime<Utc>,
) -> Vec<ActivityEntry> {
    let by_id: HashMap<&ItemId, &CatalogItem> =
        catalog.iter().map(|item| (&item.id, item)).collect();

    let mut dated: Vec<(&ProgressRecord, DateTime<Utc>)> = records
        .iter()
        .filter_map(|record| record.updated_at.map(|at| (record, at)))
        .collect();
    dated.sort_by(|a, b| b.1.cmp(&a.1));

    dated
        .into_iter()
        .take(MAX_RECENT)
        .filter_map(|(record, at)| {
            by_id.get(&record.item_id).map(|item| ActivityEntry {
                item_id: record.item_id.clone(),
                title: item.title.clone(),
                time_label: relative_label(at, now),
                score: record.score,
                exp: record.score,
                percentage: record.percentage,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, ProgressStatus};
    use crate::time::fixed_now;
    use chrono::Duration;

    fn item(id: &str) -> CatalogItem {
        CatalogItem::new(id, Level::Basico, 1, format!("Lección {id}")).unwrap()
    }

    fn record(id: &str, minutes_ago: i64) -> ProgressRecord {
        ProgressRecord::new(
            ItemId::new(id),
            ProgressStatus::Completed,
            100,
            70,
            Some(fixed_now() - Duration::minutes(minutes_ago)),
        )
    }

    #[test]
    fn feed_is_newest_first_and_capped_at_five() {
        let catalog: Vec<CatalogItem> =
            (1..=7).map(|i| item(&i.to_string())).collect();
        let records: Vec<ProgressRecord> = (1..=7)
            .map(|i| record(&i.to_string(), i64::from(i)))
            .collect();

        let feed = recent_activity(&records, &catalog, fixed_now());

        assert_eq!(feed.len(), 5);
        let ids: Vec<&str> = feed.iter().map(|e| e.item_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn entries_without_catalog_item_are_dropped() {
        let catalog = vec![item("1")];
        let records = vec![record("1", 5), record("ghost", 1)];

        let feed = recent_activity(&records, &catalog, fixed_now());

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].item_id.as_str(), "1");
    }

    #[test]
    fn records_without_timestamp_are_skipped() {
        let catalog = vec![item("1")];
        let mut stale = record("1", 5);
        stale.updated_at = None;

        assert!(recent_activity(&[stale], &catalog, fixed_now()).is_empty());
    }

    #[test]
    fn entries_carry_relative_labels_and_scores() {
        let catalog = vec![item("1")];
        let records = vec![record("1", 5)];

        let feed = recent_activity(&records, &catalog, fixed_now());

        assert_eq!(feed[0].time_label, "hace 5 min");
        assert_eq!(feed[0].title, "Lección 1");
        assert_eq!(feed[0].score, 70);
        assert_eq!(feed[0].exp, 70);
        assert_eq!(feed[0].percentage, 100);
    }
}
