//! Inference Pipeline - record → features → scaler → classifier → verdict
//!
//! [`predict`] is a pure function of its inputs. [`Pipeline`] binds it to
//! an [`ArtifactStore`] and keeps latency statistics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::artifacts::ArtifactStore;
use super::classifier::Classifier;
use super::scaler::Scaler;
use super::verdict::Verdict;
use crate::error::InferenceError;
use crate::features::{FeatureVector, ObservationRecord};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub label: i64,
    pub verdict: Verdict,
    pub features: FeatureVector,
    pub inference_time_us: u64,
}

/// Engine statistics for status output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Run one observation through the scaler and classifier
pub fn predict(
    record: &ObservationRecord,
    classifier: &dyn Classifier,
    scaler: &dyn Scaler,
) -> Result<Prediction, InferenceError> {
    let start_time = Instant::now();

    let features = FeatureVector::assemble(record);
    let scaled = scaler.transform(&features.to_matrix())?;
    let labels = classifier.predict(&scaled)?;

    if labels.len() != 1 {
        return Err(InferenceError::UnexpectedLabelCount(labels.len()));
    }
    let label = labels[0];

    let inference_time_us = start_time.elapsed().as_micros() as u64;
    log::debug!(
        "Prediction: label={} ({}us) features={}",
        label,
        inference_time_us,
        features.to_log_entry()
    );

    Ok(Prediction {
        label,
        verdict: Verdict::from_label(label),
        features,
        inference_time_us,
    })
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Prediction service over the cached artifact pair
#[derive(Debug)]
pub struct Pipeline {
    store: Arc<ArtifactStore>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl Pipeline {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self {
            store,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &Arc<ArtifactStore> {
        &self.store
    }

    pub fn run(&self, record: &ObservationRecord) -> Result<Prediction, InferenceError> {
        let artifacts = self.store.get()?;
        let prediction = predict(record, &artifacts.classifier, &artifacts.scaler)?;

        self.latency_sum_us.fetch_add(prediction.inference_time_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(prediction)
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: self.store.loaded().is_some(),
            inference_count: count,
            avg_latency_ms: avg,
        }
    }
}
