//! Feature Vector - the ordered model input row
//!
//! Projects an [`ObservationRecord`] onto `FEATURE_LAYOUT`. The timestamp
//! is never part of the vector and the trend columns are always zero.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::layout::{
    layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, PM_DIFF_INDEX, PM_RATE_INDEX,
};
use super::observation::ObservationRecord;

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Assemble the model input row from one observation
    pub fn assemble(record: &ObservationRecord) -> Self {
        let mut values = [0.0f64; FEATURE_COUNT];

        for (slot, name) in values.iter_mut().zip(FEATURE_LAYOUT.iter()) {
            *slot = record.get(name).unwrap_or(0.0);
        }

        values[PM_DIFF_INDEX] = 0.0;
        values[PM_RATE_INDEX] = 0.0;

        Self::from_values(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Single-row matrix (1 × FEATURE_COUNT) for scaler and classifier
    pub fn to_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, j)| self.values[j])
    }

    /// JSON form for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

impl From<&ObservationRecord> for FeatureVector {
    fn from(record: &ObservationRecord) -> Self {
        Self::assemble(record)
    }
}

// ============================================================================
// TESTS
// ============================================================================
