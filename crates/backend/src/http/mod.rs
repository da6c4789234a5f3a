pub(crate) mod wire;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::env;
use tracing::warn;

use shuar_core::model::{CatalogItem, CatalogKind, ItemId, ProgressRecord, UserId};

use crate::repository::{BackendError, CatalogRepository, ProgressRepository};
use wire::{CODE_OK, Envelope, ListData};

/// Page size used when walking a paged catalog listing.
const PAGE_LIMIT: u32 = 50;

#[derive(Clone, Debug)]
pub struct HttpBackendConfig {
    pub base_url: String,
}

impl HttpBackendConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads the backend base URL from `EDUSHUAR_API_URL`.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("EDUSHUAR_API_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        Some(Self::new(base_url))
    }
}

/// REST client for the EduShuar backend.
///
/// Decodes the `COD_OK` envelope, walks pagination, and normalizes the
/// backend's loose field names through the wire adapter. Malformed
/// records are skipped with a warning; a malformed envelope is an error.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: HttpBackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/api/{route}", self.base_url)
    }

    /// POSTs a JSON body and unwraps the response envelope down to `data`.
    async fn post_enveloped(&self, route: &str, body: Value) -> Result<Value, BackendError> {
        let response = self
            .client
            .post(self.endpoint(route))
            .json(&body)
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))?;

        if envelope.code != CODE_OK {
            return Err(BackendError::Envelope {
                code: envelope.code,
                message: envelope.message,
            });
        }
        envelope.data.ok_or(BackendError::MissingData("data"))
    }

    async fn list_page(
        &self,
        kind: CatalogKind,
        page: u32,
    ) -> Result<(Vec<CatalogItem>, Option<u32>), BackendError> {
        let route = format!("{}/list", kind.route_segment());
        let data = self
            .post_enveloped(&route, json!({ "page": page, "limit": PAGE_LIMIT }))
            .await?;
        let list: ListData =
            serde_json::from_value(data).map_err(|err| BackendError::Decode(err.to_string()))?;

        let mut items = Vec::with_capacity(list.items.len());
        for raw in list.items {
            match wire::parse_catalog_item(raw) {
                Ok(item) => items.push(item),
                Err(reason) => warn!(%kind, %reason, "skipping malformed catalog item"),
            }
        }
        Ok((items, list.pagination.and_then(|p| p.total_pages)))
    }
}

#[async_trait]
impl CatalogRepository for HttpBackend {
    async fn list_items(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, BackendError> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let (mut batch, total_pages) = self.list_page(kind, page).await?;
            let batch_len = batch.len();
            items.append(&mut batch);

            let more = match total_pages {
                Some(total) => page < total,
                // Without pagination metadata, a full page means there
                // may be another one.
                None => batch_len == PAGE_LIMIT as usize,
            };
            if !more {
                return Ok(items);
            }
            page += 1;
        }
    }

    async fn get_item(
        &self,
        kind: CatalogKind,
        id: &ItemId,
    ) -> Result<CatalogItem, BackendError> {
        let route = format!("{}/get", kind.route_segment());
        let data = self
            .post_enveloped(&route, json!({ "id": id.as_str() }))
            .await?;
        wire::parse_catalog_item(data).map_err(BackendError::Decode)
    }
}

#[async_trait]
impl ProgressRepository for HttpBackend {
    async fn list_progress(&self, user: &UserId) -> Result<Vec<ProgressRecord>, BackendError> {
        let data = self
            .post_enveloped("progress/list", json!({ "userId": user.as_str() }))
            .await?;
        let list: ListData =
            serde_json::from_value(data).map_err(|err| BackendError::Decode(err.to_string()))?;

        let mut records = Vec::with_capacity(list.items.len());
        for raw in list.items {
            match wire::parse_progress(raw) {
                Ok(record) => records.push(record),
                Err(reason) => warn!(user = %user, %reason, "skipping malformed progress record"),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_env_requires_non_empty_url() {
        unsafe {
            env::set_var("EDUSHUAR_API_URL", "");
        }
        assert!(HttpBackendConfig::from_env().is_none());
        unsafe {
            env::set_var("EDUSHUAR_API_URL", "https://api.edushuar.example/");
        }
        let config = HttpBackendConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://api.edushuar.example/");
        unsafe {
            env::remove_var("EDUSHUAR_API_URL");
        }
    }

    #[test]
    fn endpoint_joins_base_and_route() {
        let backend = HttpBackend::new(HttpBackendConfig::new("https://api.edushuar.example/"));
        assert_eq!(
            backend.endpoint("lessons/list"),
            "https://api.edushuar.example/api/lessons/list"
        );
    }
}
