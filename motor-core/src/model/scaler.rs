//! Feature Scaler - standardizes raw rows to the training distribution
//!
//! Scaler parameters are fit by the training pipeline and stored as JSON.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, InferenceError};

/// Transform capability of a fitted scaler
pub trait Scaler: Send + Sync {
    /// Number of columns the scaler was fit on
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, if any
    fn feature_names(&self) -> Option<&[String]>;

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, InferenceError>;
}

/// Serialized scaler as written by the training pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// `(x - mean) / scale`
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
    /// `(x - data_min) / (data_max - data_min)`
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
    /// Pass-through
    Identity {
        n_features: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
}

impl ScalerArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ScalerArtifact::Standard { .. } => "standard",
            ScalerArtifact::MinMax { .. } => "min_max",
            ScalerArtifact::Identity { .. } => "identity",
        }
    }

    /// Structural checks, independent of the feature layout
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let (a, b, names) = match self {
            ScalerArtifact::Standard { mean, scale, feature_names } => (mean, scale, feature_names),
            ScalerArtifact::MinMax { data_min, data_max, feature_names } => {
                (data_min, data_max, feature_names)
            }
            ScalerArtifact::Identity { n_features, feature_names } => {
                if *n_features == 0 {
                    return Err(ArtifactError::InvalidArtifact(
                        "identity scaler declares zero features".to_string(),
                    ));
                }
                return check_names_len(feature_names, *n_features);
            }
        };

        if a.len() != b.len() {
            return Err(ArtifactError::InvalidArtifact(format!(
                "{} scaler parameter lengths differ: {} vs {}",
                self.kind(),
                a.len(),
                b.len()
            )));
        }
        if a.is_empty() {
            return Err(ArtifactError::InvalidArtifact(format!(
                "{} scaler has no parameters",
                self.kind()
            )));
        }
        if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
            return Err(ArtifactError::InvalidArtifact(format!(
                "{} scaler contains non-finite parameters",
                self.kind()
            )));
        }

        check_names_len(names, a.len())
    }
}

fn check_names_len(names: &Option<Vec<String>>, expected: usize) -> Result<(), ArtifactError> {
    match names {
        Some(names) if names.len() != expected => Err(ArtifactError::InvalidArtifact(format!(
            "{} feature names for {} columns",
            names.len(),
            expected
        ))),
        _ => Ok(()),
    }
}

/// Zero spread means a constant training column; leave it unscaled
fn safe_divisor(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

impl Scaler for ScalerArtifact {
    fn n_features(&self) -> usize {
        match self {
            ScalerArtifact::Standard { mean, .. } => mean.len(),
            ScalerArtifact::MinMax { data_min, .. } => data_min.len(),
            ScalerArtifact::Identity { n_features, .. } => *n_features,
        }
    }

    fn feature_names(&self) -> Option<&[String]> {
        match self {
            ScalerArtifact::Standard { feature_names, .. }
            | ScalerArtifact::MinMax { feature_names, .. }
            | ScalerArtifact::Identity { feature_names, .. } => feature_names.as_deref(),
        }
    }

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, InferenceError> {
        let expected = self.n_features();
        if x.ncols() != expected {
            return Err(InferenceError::ShapeMismatch {
                stage: "scaler",
                expected,
                actual: x.ncols(),
            });
        }

        let mut out = x.to_owned();

        match self {
            ScalerArtifact::Standard { mean, scale, .. } => {
                for mut row in out.rows_mut() {
                    for (j, v) in row.iter_mut().enumerate() {
                        *v = (*v - mean[j]) / safe_divisor(scale[j]);
                    }
                }
            }
            ScalerArtifact::MinMax { data_min, data_max, .. } => {
                for mut row in out.rows_mut() {
                    for (j, v) in row.iter_mut().enumerate() {
                        *v = (*v - data_min[j]) / safe_divisor(data_max[j] - data_min[j]);
                    }
                }
            }
            ScalerArtifact::Identity { .. } => {}
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_transform() {
        let scaler = ScalerArtifact::Standard {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 0.0],
            feature_names: None,
        };

        let out = scaler.transform(&array![[14.0, 3.0]]).unwrap();
        assert_eq!(out, array![[2.0, 3.0]]);
    }

    #[test]
    fn test_min_max_transform() {
        let scaler = ScalerArtifact::MinMax {
            data_min: vec![0.0, 20.0],
            data_max: vec![4000.0, 20.0],
            feature_names: None,
        };

        let out = scaler.transform(&array![[1000.0, 25.0]]).unwrap();
        assert_eq!(out, array![[0.25, 5.0]]);
    }

    #[test]
    fn test_identity_transform() {
        let scaler = ScalerArtifact::Identity { n_features: 3, feature_names: None };
        let x = array![[1.0, -2.0, 3.5]];
        assert_eq!(scaler.transform(&x).unwrap(), x);
    }

    #[test]
    fn test_shape_mismatch() {
        let scaler = ScalerArtifact::Identity { n_features: 14, feature_names: None };
        let err = scaler.transform(&array![[1.0, 2.0]]).unwrap_err();

        assert!(matches!(
            err,
            InferenceError::ShapeMismatch { stage: "scaler", expected: 14, actual: 2 }
        ));
    }

    #[test]
    fn test_validate_lengths() {
        let scaler = ScalerArtifact::Standard {
            mean: vec![0.0, 1.0],
            scale: vec![1.0],
            feature_names: None,
        };
        assert!(matches!(scaler.validate(), Err(ArtifactError::InvalidArtifact(_))));

        let scaler = ScalerArtifact::Identity {
            n_features: 2,
            feature_names: Some(vec!["a".to_string()]),
        };
        assert!(scaler.validate().is_err());
    }

    #[test]
    fn test_deserialize_tagged() {
        let scaler: ScalerArtifact = serde_json::from_str(
            r#"{"kind": "standard", "mean": [1.0], "scale": [2.0], "feature_names": ["ambient"]}"#,
        )
        .unwrap();

        assert_eq!(scaler.kind(), "standard");
        assert_eq!(scaler.n_features(), 1);
        assert_eq!(scaler.feature_names(), Some(&["ambient".to_string()][..]));
    }
}
