use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a catalog item (lesson or story).
///
/// The backend issues these; the format is opaque here.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new `ItemId` from a backend identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a user.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Parses a user identifier, rejecting empty or whitespace-only input.
    ///
    /// An absent identifier must stop a sync before any network call, so
    /// the emptiness check lives here rather than in every caller.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the underlying identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_display() {
        let id = ItemId::new("lesson-42");
        assert_eq!(id.to_string(), "lesson-42");
    }

    #[test]
    fn test_user_id_parse_trims() {
        let id = UserId::parse("  u-7  ").unwrap();
        assert_eq!(id.as_str(), "u-7");
    }

    #[test]
    fn test_user_id_parse_rejects_empty() {
        assert!(UserId::parse("").is_none());
        assert!(UserId::parse("   ").is_none());
    }

    #[test]
    fn test_item_id_equality() {
        assert_eq!(ItemId::new("1"), ItemId::new("1"));
        assert_ne!(ItemId::new("1"), ItemId::new("2"));
    }
}
