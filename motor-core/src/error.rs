//! Error types for artifact loading and inference

use std::path::PathBuf;

/// Failure to obtain a usable scaler/classifier pair
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),
}

/// Failure of a single prediction
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("{stage} expected {expected} features, got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("classifier returned {0} labels for a single row")]
    UnexpectedLabelCount(usize),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
