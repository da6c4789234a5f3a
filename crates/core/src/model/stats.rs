use serde::Serialize;

/// Aggregate progress statistics for one user over one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalStats {
    pub completed: usize,
    pub total: usize,
    /// Rounded completion percentage; 0 when the catalog is empty.
    pub percentage: u8,
    /// Human label for the level the user is currently working in.
    pub level_label: String,
    /// Consecutive calendar days (UTC) with at least one progress update,
    /// anchored at today or yesterday.
    pub streak_days: u32,
}
