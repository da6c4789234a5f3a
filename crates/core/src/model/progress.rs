use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ItemId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("unknown progress status: {0}")]
    UnknownStatus(String),
}

//
// ─── PROGRESS STATUS ───────────────────────────────────────────────────────────
//

/// Backend vocabulary for a progress record's state.
///
/// `Unlocked` covers both "not started" and "partially done"; the split
/// into available/in-progress happens during derivation based on the
/// recorded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Unlocked,
    Completed,
}

impl ProgressStatus {
    /// Parses the backend status string.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownStatus` for anything outside the
    /// backend vocabulary; the adapter skips such records.
    pub fn parse(raw: &str) -> Result<Self, ProgressError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("unlocked") {
            Ok(Self::Unlocked)
        } else if trimmed.eq_ignore_ascii_case("completed") {
            Ok(Self::Completed)
        } else {
            Err(ProgressError::UnknownStatus(trimmed.to_string()))
        }
    }
}

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// A user's interaction with one catalog item, as recorded by the backend.
///
/// One record per (user, item) pair is the expectation; duplicates are
/// resolved at indexing time by the freshest `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressRecord {
    pub item_id: ItemId,
    pub status: ProgressStatus,
    pub percentage: u8,
    pub score: u32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// Builds a record, clamping the percentage into 0..=100.
    #[must_use]
    pub fn new(
        item_id: ItemId,
        status: ProgressStatus,
        percentage: u32,
        score: u32,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let percentage = percentage.min(100) as u8;
        Self {
            item_id,
            status,
            percentage,
            score,
            updated_at,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == ProgressStatus::Completed
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_backend_vocabulary() {
        assert_eq!(ProgressStatus::parse("unlocked").unwrap(), ProgressStatus::Unlocked);
        assert_eq!(ProgressStatus::parse(" Completed ").unwrap(), ProgressStatus::Completed);
    }

    #[test]
    fn status_rejects_unknown_values() {
        let err = ProgressStatus::parse("archived").unwrap_err();
        assert_eq!(err, ProgressError::UnknownStatus("archived".to_string()));
    }

    #[test]
    fn record_clamps_percentage() {
        let record = ProgressRecord::new(ItemId::new("l1"), ProgressStatus::Unlocked, 250, 0, None);
        assert_eq!(record.percentage, 100);
    }

    #[test]
    fn completed_flag_follows_status() {
        let record =
            ProgressRecord::new(ItemId::new("l1"), ProgressStatus::Completed, 100, 80, None);
        assert!(record.is_completed());
    }
}
