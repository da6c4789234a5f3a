use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::ItemId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog item is missing an id")]
    MissingId,

    #[error("catalog item title cannot be empty")]
    EmptyTitle,
}

//
// ─── CATALOG KIND ──────────────────────────────────────────────────────────────
//

/// Which catalog a sync operates on.
///
/// Lessons and stories share the same derivation; the kind only selects
/// the backend endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Lessons,
    Stories,
}

impl CatalogKind {
    /// Backend route segment for this catalog.
    #[must_use]
    pub fn route_segment(self) -> &'static str {
        match self {
            CatalogKind::Lessons => "lessons",
            CatalogKind::Stories => "stories",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_segment())
    }
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// Difficulty level of a catalog item, in the backend's Spanish vocabulary.
///
/// Level is a display grouping only. Unlocking is strictly sequential over
/// the whole catalog and never tracks levels independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Basico,
    Intermedio,
    Avanzado,
    /// Any level string the backend sends outside the known three,
    /// preserved verbatim.
    Other(String),
}

impl Level {
    /// Parses a backend level string. Unknown values are kept as `Other`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Básico" | "básico" => Level::Basico,
            "Intermedio" | "intermedio" => Level::Intermedio,
            "Avanzado" | "avanzado" => Level::Avanzado,
            other => Level::Other(other.to_string()),
        }
    }

    /// Canonical display string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Level::Basico => "Básico",
            Level::Intermedio => "Intermedio",
            Level::Avanzado => "Avanzado",
            Level::Other(raw) => raw,
        }
    }

    /// Display rank: Básico first, unknown levels last.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Level::Basico => 0,
            Level::Intermedio => 1,
            Level::Avanzado => 2,
            Level::Other(_) => 3,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── CATALOG ITEM ──────────────────────────────────────────────────────────────
//

/// One lesson or story in the catalog.
///
/// The backend is the sole writer; this layer only reads. `order` drives
/// sequential unlocking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub level: Level,
    pub order: u32,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl CatalogItem {
    /// Validates and builds a catalog item from already-normalized fields.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the id or title is empty.
    pub fn new(
        id: impl Into<String>,
        level: Level,
        order: u32,
        title: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CatalogError::MissingId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle);
        }

        Ok(Self {
            id: ItemId::new(id),
            level,
            order,
            title,
            description: None,
            image_url: None,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_known_spanish_values() {
        assert_eq!(Level::parse("Básico"), Level::Basico);
        assert_eq!(Level::parse(" Intermedio "), Level::Intermedio);
        assert_eq!(Level::parse("avanzado"), Level::Avanzado);
    }

    #[test]
    fn level_preserves_unknown_values() {
        let level = Level::parse("Otros");
        assert_eq!(level, Level::Other("Otros".to_string()));
        assert_eq!(level.as_str(), "Otros");
        assert_eq!(level.rank(), 3);
    }

    #[test]
    fn item_rejects_empty_id() {
        let err = CatalogItem::new("  ", Level::Basico, 1, "Saludos").unwrap_err();
        assert_eq!(err, CatalogError::MissingId);
    }

    #[test]
    fn item_rejects_empty_title() {
        let err = CatalogItem::new("l1", Level::Basico, 1, "").unwrap_err();
        assert_eq!(err, CatalogError::EmptyTitle);
    }

    #[test]
    fn item_builders_attach_optional_fields() {
        let item = CatalogItem::new("l1", Level::Basico, 1, "Saludos")
            .unwrap()
            .with_description("Primeras palabras")
            .with_image_url("https://cdn.example/l1.png");

        assert_eq!(item.id, ItemId::new("l1"));
        assert_eq!(item.description.as_deref(), Some("Primeras palabras"));
        assert_eq!(item.image_url.as_deref(), Some("https://cdn.example/l1.png"));
    }
}
