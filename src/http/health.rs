//! Liveness endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "Code Fixer Agent";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub sonarqube_url: String,
}

/// `GET /api/health`. Always 200; SonarQube is not re-checked here.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    state.logger.info("Health check", Some("health_check"), None);
    Json(HealthResponse {
        status: "OK",
        service: SERVICE_NAME,
        sonarqube_url: state.sonarqube_url.to_string(),
    })
}
