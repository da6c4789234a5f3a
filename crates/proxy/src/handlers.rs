use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::{info, warn};

use services::TranslationError;

use crate::AppState;

/// Single entry point for `/translate`.
///
/// OPTIONS answers the CORS preflight, POST forwards to the upstream,
/// anything else is 405. Every response, including errors, carries the
/// CORS headers so the browser can read it.
pub async fn translate_entry(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    let response = match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => handle_post(&state, &body).await,
        other => {
            warn!(method = %other, "method not allowed on /translate");
            (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "error": "Method not allowed" })),
            )
                .into_response()
        }
    };
    with_cors(response)
}

async fn handle_post(state: &AppState, body: &Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(err) => return internal_error(&err.to_string()),
    };

    let text = payload
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing \"text\" in request body" })),
        )
            .into_response();
    }

    info!(chars = text.len(), "forwarding translation request");
    match state.translator.translate(text).await {
        Ok(translation) => (StatusCode::OK, Json(translation)).into_response(),
        Err(TranslationError::Upstream { status, details }) => {
            warn!(status, "upstream translation API error");
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                code,
                Json(json!({
                    "error": format!("Translation API error: {status}"),
                    "details": details,
                })),
            )
                .into_response()
        }
        Err(err) => internal_error(&err.to_string()),
    }
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error", "message": message })),
    )
        .into_response()
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("Content-Type"),
    );
    response
}
