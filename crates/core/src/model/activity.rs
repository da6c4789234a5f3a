use serde::Serialize;

use crate::model::ids::ItemId;

/// One row of the recent-activity feed.
///
/// Joined from the freshest progress records and their catalog items; a
/// record whose item vanished from the catalog is dropped at derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub item_id: ItemId,
    pub title: String,
    /// Relative-time label, e.g. "hace 5 min".
    pub time_label: String,
    pub score: u32,
    pub exp: u32,
    pub percentage: u8,
}
