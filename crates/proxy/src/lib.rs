//! Translation proxy - forwards browser translation requests to the
//! fixed upstream API, relaying status and body with CORS headers.
//!
//! The browser cannot call the upstream service cross-origin, so this
//! sits in between. Stateless: every request is handled independently
//! and maps to exactly one upstream call.

#![forbid(unsafe_code)]

pub mod handlers;

use axum::{Router, routing::any};

use services::TranslationService;

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub translator: TranslationService,
}

impl AppState {
    #[must_use]
    pub fn new(translator: TranslationService) -> Self {
        Self { translator }
    }
}

/// Create the proxy router.
///
/// A single route takes every method; the handler dispatches by hand so
/// the 405 contract (JSON body, CORS headers) stays under our control.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/translate", any(handlers::translate_entry))
        .with_state(state)
}
