//! Wire-format types and normalization for the backend REST API.
//!
//! The backend's JSON is loose: field names drift between snake_case,
//! camelCase, and Spanish, ids arrive as strings or numbers, timestamps
//! as RFC 3339 or epoch milliseconds. Everything heterogeneous is
//! absorbed here so the rest of the workspace only ever sees the fixed
//! core types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use shuar_core::model::{CatalogItem, ItemId, Level, ProgressRecord, ProgressStatus};

/// Envelope `code` value signalling success.
pub(crate) const CODE_OK: &str = "COD_OK";

/// Response envelope used by every backend endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Paged list payload under `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListData {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Pagination {
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<u32>,
}

/// An id that arrives as either a JSON string or a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum IdValue {
    Text(String),
    Number(i64),
}

impl IdValue {
    pub(crate) fn into_string(self) -> String {
        match self {
            IdValue::Text(text) => text,
            IdValue::Number(number) => number.to_string(),
        }
    }
}

/// A timestamp that arrives as RFC 3339 text or epoch milliseconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
}

impl RawTimestamp {
    fn parse(self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
                .ok()
                .map(|at| at.with_timezone(&Utc)),
            RawTimestamp::Millis(millis) => DateTime::from_timestamp_millis(millis),
        }
    }
}

//
// ─── CATALOG ITEMS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct RawCatalogItem {
    #[serde(default, alias = "_id")]
    id: Option<IdValue>,
    #[serde(default, alias = "nivel")]
    level: Option<String>,
    #[serde(default, alias = "orden")]
    order: Option<u32>,
    #[serde(default, alias = "titulo", alias = "titleShuar", alias = "title_shuar")]
    title: Option<String>,
    #[serde(default, alias = "descripcion")]
    description: Option<String>,
    #[serde(default, alias = "imageUrl", alias = "imagen")]
    image_url: Option<String>,
}

/// Normalizes one raw catalog item.
///
/// # Errors
///
/// Returns a description of what made the record unusable; the caller
/// logs it and skips the record.
pub(crate) fn parse_catalog_item(value: Value) -> Result<CatalogItem, String> {
    let raw: RawCatalogItem =
        serde_json::from_value(value).map_err(|err| format!("catalog item: {err}"))?;

    let id = raw
        .id
        .ok_or_else(|| "catalog item without id".to_string())?
        .into_string();
    let title = raw
        .title
        .ok_or_else(|| format!("catalog item {id} without title"))?;
    let level = Level::parse(raw.level.as_deref().unwrap_or_default());

    let mut item = CatalogItem::new(id, level, raw.order.unwrap_or(0), title)
        .map_err(|err| err.to_string())?;
    if let Some(description) = raw.description {
        item = item.with_description(description);
    }
    if let Some(image_url) = raw.image_url {
        item = item.with_image_url(image_url);
    }
    Ok(item)
}

//
// ─── PROGRESS RECORDS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct RawProgress {
    // The backend reuses `lessonId` for stories as well.
    #[serde(default, alias = "lessonId", alias = "itemId", alias = "item_id")]
    lesson_id: Option<IdValue>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "porcentaje")]
    percentage: Option<f64>,
    #[serde(default, alias = "puntaje")]
    score: Option<i64>,
    #[serde(default, alias = "updatedAt")]
    updated_at: Option<RawTimestamp>,
}

/// Normalizes one raw progress record.
///
/// Strict about identity and status (a record without them is
/// meaningless); permissive about the rest — an unparsable timestamp
/// becomes `None`, percentage and score default to zero and clamp.
///
/// # Errors
///
/// Returns a description of what made the record unusable.
pub(crate) fn parse_progress(value: Value) -> Result<ProgressRecord, String> {
    let raw: RawProgress =
        serde_json::from_value(value).map_err(|err| format!("progress record: {err}"))?;

    let item_id = raw
        .lesson_id
        .ok_or_else(|| "progress record without lessonId".to_string())?
        .into_string();
    let status = raw
        .status
        .ok_or_else(|| format!("progress record {item_id} without status"))?;
    let status = ProgressStatus::parse(&status).map_err(|err| err.to_string())?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percentage = raw.percentage.unwrap_or(0.0).clamp(0.0, 100.0).round() as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = raw.score.unwrap_or(0).max(0) as u32;
    let updated_at = raw.updated_at.and_then(RawTimestamp::parse);

    Ok(ProgressRecord::new(
        ItemId::new(item_id),
        status,
        percentage,
        score,
        updated_at,
    ))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
