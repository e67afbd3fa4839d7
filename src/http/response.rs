//! Shared responses.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Fallback for unknown routes: `404 {"detail": "Not Found"}`.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}
