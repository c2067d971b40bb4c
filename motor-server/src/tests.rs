//! Router tests driven in-process with `tower::ServiceExt::oneshot`

use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use motor_core::{ArtifactPaths, ArtifactStore, Pipeline};
use tower::ServiceExt;

use crate::config::Config;
use crate::{create_router, AppState};

const SPEED_STUMP: &str = r#"{"kind": "decision_tree", "n_features": 14, "nodes": [
    {"feature": 4, "threshold": 2000.0, "left": 1, "right": 2},
    {"leaf": 0}, {"leaf": 1}]}"#;

const IDENTITY: &str = r#"{"kind": "identity", "n_features": 14}"#;

fn app_with(dir: &Path, model: Option<&str>, scaler: Option<&str>) -> (Router, Arc<Pipeline>) {
    let paths = ArtifactPaths {
        model: dir.join("final_motor_failure_model.json"),
        scaler: dir.join("scaler.json"),
    };
    if let Some(model) = model {
        std::fs::write(&paths.model, model).unwrap();
    }
    if let Some(scaler) = scaler {
        std::fs::write(&paths.scaler, scaler).unwrap();
    }

    let pipeline = Arc::new(Pipeline::new(Arc::new(ArtifactStore::new(paths))));
    let state = AppState {
        pipeline: Arc::clone(&pipeline),
        config: Config::default(),
    };
    (create_router(state), pipeline)
}

fn app(dir: &Path) -> Router {
    app_with(dir, Some(SPEED_STUMP), Some(IDENTITY)).0
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: Router, uri: &str, body: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_index_defaults_render_warning() {
    let dir = tempfile::tempdir().unwrap();
    let response = get(app(dir.path()), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"class="verdict warning""#));
    assert!(html.contains("Possible failure detected"));
}

#[tokio::test]
async fn test_index_stopped_motor_renders_success() {
    let dir = tempfile::tempdir().unwrap();
    let response = get(app(dir.path()), "/?motor_speed=0&timestamp=1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"class="verdict success""#));
    assert!(html.contains(r#"name="motor_speed" min="0" max="4000" step="0.1" value="0""#));
}

#[tokio::test]
async fn test_index_clamps_out_of_domain_values() {
    let dir = tempfile::tempdir().unwrap();
    let response = get(app(dir.path()), "/?motor_speed=99999&torque=abc").await;

    let html = body_text(response).await;
    assert!(html.contains(r#"value="4000""#));
    assert!(html.contains(r#"name="torque" min="0" max="200" step="0.1" value="75""#));
}

#[tokio::test]
async fn test_index_without_artifacts_is_an_error_page() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = app_with(dir.path(), None, Some(IDENTITY));

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(response).await;
    assert!(html.contains("Model artifacts could not be loaded"));
}

#[tokio::test]
async fn test_predict_api() {
    let dir = tempfile::tempdir().unwrap();

    let response = post_json(app(dir.path()), "/api/v1/predict", r#"{"motor_speed": 3200}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["label"], 1);
    assert_eq!(json["verdict"], "failure");
    assert_eq!(json["features"].as_array().unwrap().len(), 14);

    let response = post_json(app(dir.path()), "/api/v1/predict", r#"{"motor_speed": 0}"#).await;
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["label"], 0);
    assert_eq!(json["verdict"], "normal");
}

#[tokio::test]
async fn test_predict_api_rejects_malformed_body() {
    let dir = tempfile::tempdir().unwrap();
    let response = post_json(app(dir.path()), "/api/v1/predict", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_model_status_after_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let (app, pipeline) = app_with(dir.path(), Some(SPEED_STUMP), Some(IDENTITY));

    let _ = get(app.clone(), "/").await;
    let _ = get(app.clone(), "/?motor_speed=0").await;
    assert_eq!(pipeline.store().load_count(), 1);

    let response = get(app, "/api/v1/model").await;
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["artifacts"]["model_kind"], "decision_tree");
    assert_eq!(json["layout"]["feature_count"], 14);
    assert_eq!(json["engine"]["inference_count"], 2);
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let (app, pipeline) = app_with(dir.path(), Some(SPEED_STUMP), Some(IDENTITY));
    pipeline.store().get().unwrap();

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model_loaded"], true);
}
