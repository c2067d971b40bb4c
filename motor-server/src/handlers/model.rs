//! Model status handler

use axum::{extract::State, Json};
use motor_core::LayoutInfo;

use crate::models::ModelStatusResponse;
use crate::AppState;

pub async fn status(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    let pipeline = &state.pipeline;

    Json(ModelStatusResponse {
        artifacts: pipeline.store().loaded().map(|a| a.metadata.clone()),
        layout: LayoutInfo::current(),
        engine: pipeline.status(),
    })
}
