//! Prediction API model

use motor_core::{Prediction, Verdict};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub label: i64,
    pub verdict: Verdict,
    pub message: String,
    pub features: Vec<f64>,
    pub inference_time_us: u64,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            label: prediction.label,
            verdict: prediction.verdict,
            message: prediction.verdict.message().to_string(),
            features: prediction.features.as_slice().to_vec(),
            inference_time_us: prediction.inference_time_us,
        }
    }
}
