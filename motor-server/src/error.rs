//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use motor_core::{ArtifactError, InferenceError};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    ValidationError(String),

    // Model errors
    ArtifactUnavailable(String),
    InferenceFailed(String),
}

impl AppError {
    /// Status code and client-facing message, logging server-side detail
    pub fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::ArtifactUnavailable(msg) => {
                tracing::error!("Artifact error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Model artifacts could not be loaded")
            }
            AppError::InferenceFailed(msg) => {
                tracing::error!("Inference error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ArtifactError> for AppError {
    fn from(err: ArtifactError) -> Self {
        AppError::ArtifactUnavailable(err.to_string())
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Artifact(e) => e.into(),
            other => AppError::InferenceFailed(other.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_error_mapping() {
        let shape = InferenceError::ShapeMismatch { stage: "scaler", expected: 14, actual: 13 };
        assert!(matches!(AppError::from(shape), AppError::InferenceFailed(_)));

        let missing = InferenceError::Artifact(ArtifactError::SchemaMismatch("x".into()));
        let err = AppError::from(missing);
        assert!(matches!(err, AppError::ArtifactUnavailable(_)));
        assert_eq!(err.status_and_message().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let failed = AppError::InferenceFailed("row 0: nan".into());
        assert_eq!(
            failed.status_and_message(),
            (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
        );

        let missing = AppError::ArtifactUnavailable("/tmp/model.json".into());
        assert_eq!(missing.status_and_message().1, "Model artifacts could not be loaded");
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = AppError::ValidationError("bad body".into());
        assert_eq!(err.status_and_message(), (StatusCode::BAD_REQUEST, "bad body"));
    }
}
