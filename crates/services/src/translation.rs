use std::env;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::TranslationError;

#[derive(Clone, Debug)]
pub struct TranslationConfig {
    pub upstream_url: String,
}

impl TranslationConfig {
    #[must_use]
    pub fn new(upstream_url: impl Into<String>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
        }
    }

    /// Reads the upstream endpoint from `EDUSHUAR_TRANSLATE_URL`.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let upstream_url = env::var("EDUSHUAR_TRANSLATE_URL").ok()?;
        if upstream_url.trim().is_empty() {
            return None;
        }
        Some(Self::new(upstream_url))
    }
}

/// Client for the fixed upstream translation API.
///
/// One POST per call, no retries; a non-2xx upstream response is
/// surfaced with its status and raw body so callers can relay it
/// verbatim. No explicit timeout is configured, matching the platform
/// default of the original deployment.
#[derive(Clone)]
pub struct TranslationService {
    client: Client,
    config: TranslationConfig,
}

impl TranslationService {
    #[must_use]
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Translates a short text, returning the upstream JSON unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TranslationError::Upstream` when the upstream answers
    /// non-2xx, or `TranslationError::Http` on transport/decode failure.
    pub async fn translate(&self, text: &str) -> Result<Value, TranslationError> {
        let response = self
            .client
            .post(&self.config.upstream_url)
            .json(&TranslateRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(TranslationError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_env_requires_non_empty_url() {
        unsafe {
            env::set_var("EDUSHUAR_TRANSLATE_URL", " ");
        }
        assert!(TranslationConfig::from_env().is_none());
        unsafe {
            env::set_var("EDUSHUAR_TRANSLATE_URL", "https://translate.example/v1");
        }
        assert_eq!(
            TranslationConfig::from_env().unwrap().upstream_url,
            "https://translate.example/v1"
        );
        unsafe {
            env::remove_var("EDUSHUAR_TRANSLATE_URL");
        }
    }

    #[test]
    fn request_body_carries_text_field() {
        let body = serde_json::to_value(TranslateRequest { text: "wiña" }).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "wiña" }));
    }
}
