//! Motor Failure Predictor - core library
//!
//! Turns one set of motor operating parameters into a failure/normal
//! verdict using a classifier and feature scaler fit elsewhere.
//!
//! ```text
//! ObservationInput ──▶ ObservationRecord ──▶ FeatureVector (1 × 14)
//!                                                 │
//!                         ScalerArtifact::transform
//!                                                 │
//!                    ClassifierArtifact::predict ─┴─▶ label ──▶ Verdict
//! ```

pub mod error;
pub mod features;
pub mod model;

pub use error::{ArtifactError, InferenceError};
pub use features::{FeatureVector, LayoutInfo, ObservationInput, ObservationRecord};
pub use model::{ArtifactPaths, ArtifactStore, Pipeline, Prediction, Verdict};
