//! Motor Failure Predictor - Web Server
//!
//! Serves a single-page form that predicts electric motor failures.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   MOTOR FAILURE PREDICTOR                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  Form     │  │  JSON     │  │  Status                 │ │
//! │  │  Page  /  │  │  API      │  │  /health, /api/v1/model │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │           ┌──────────────────────┐                         │
//! │           │ motor_core::Pipeline │                         │
//! │           └──────────┬───────────┘                         │
//! │                      ▼                                      │
//! │        ArtifactStore (model.json + scaler.json)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod views;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use motor_core::{ArtifactStore, Pipeline};
use tower_http::{
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let default_filter = if config.is_production() {
        "motor_server=info,motor_core=info,tower_http=info"
    } else {
        "motor_server=debug,motor_core=debug,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()))
        .with(config.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.log_json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Motor Failure Predictor starting ({})...", config.environment);
    tracing::info!("Model: {}", config.model_path.display());
    tracing::info!("Scaler: {}", config.scaler_path.display());

    // Load artifacts up front, nothing is served without them
    let store = Arc::new(ArtifactStore::new(config.artifact_paths()));
    match store.get() {
        Ok(artifacts) => tracing::info!(
            "Artifacts ready: {} + {} scaler",
            artifacts.metadata.model_kind,
            artifacts.metadata.scaler_kind
        ),
        Err(e) => {
            tracing::error!("Failed to load model artifacts: {}", e);
            return Err(e).context("refusing to serve predictions without model artifacts");
        }
    }

    // Build application state
    let state = AppState {
        pipeline: Arc::new(Pipeline::new(store)),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        // UI
        .route("/", get(handlers::form::index))

        // API
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/model", get(handlers::model::status))

        // Status
        .route("/health", get(handlers::health::check))

        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
