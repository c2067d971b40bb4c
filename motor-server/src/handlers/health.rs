//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    environment: String,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_loaded = state.pipeline.store().loaded().is_some();

    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        model_loaded,
        environment: state.config.environment.clone(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
