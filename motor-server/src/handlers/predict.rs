//! Prediction API handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use motor_core::{ObservationInput, ObservationRecord};

use crate::models::PredictResponse;
use crate::{AppResult, AppState};

/// Predict from a partial observation
///
/// Missing fields take their defaults and every value is clamped, exactly
/// as the form does.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<ObservationInput>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(input) = body?;
    let record = ObservationRecord::from_input(&input);

    let prediction = state.pipeline.run(&record)?;
    tracing::info!(
        label = prediction.label,
        latency_us = prediction.inference_time_us,
        "API prediction"
    );

    Ok(Json(prediction.into()))
}
