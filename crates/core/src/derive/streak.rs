use chrono::{Duration, NaiveDate};

use crate::model::ProgressRecord;

/// Counts consecutive UTC calendar days with at least one progress update.
///
/// The chain is anchored at the most recent update day, which must be
/// `today` or yesterday; anything older means the streak is broken and
/// the count is 0. No records at all is simply a zero streak.
#[must_use]
pub fn streak_days(records: &[ProgressRecord], today: NaiveDate) -> u32 {
    let mut days: Vec<NaiveDate> = records
        .iter()
        .filter_map(|record| record.updated_at)
        .map(|at| at.date_naive())
        .collect();
    days.sort_unstable();
    days.dedup();

    let Some(&latest) = days.last() else {
        return 0;
    };
    if latest != today && latest != today - Duration::days(1) {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = latest;
    for &day in days.iter().rev().skip(1) {
        if day == cursor - Duration::days(1) {
            streak += 1;
            cursor = day;
        } else {
            break;
        }
    }
    streak
}
