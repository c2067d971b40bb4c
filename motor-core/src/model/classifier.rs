//! Classifier - hard-label failure model
//!
//! Supported artifact kinds: logistic regression, a single decision tree
//! and a random forest of trees. All of them collapse to a class label;
//! no probability is exposed.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, InferenceError};

/// Predict capability of a fitted classifier
pub trait Classifier: Send + Sync {
    /// Number of columns the model was fit on
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, if any
    fn feature_names(&self) -> Option<&[String]>;

    /// One label per input row
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>, InferenceError>;
}

// ============================================================================
// DECISION TREE NODES
// ============================================================================

/// A tree node; node 0 is the root
///
/// Children always have a larger index than their parent, so traversal
/// terminates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf {
        leaf: i64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

fn validate_tree(nodes: &[TreeNode], n_features: usize) -> Result<(), ArtifactError> {
    if nodes.is_empty() {
        return Err(ArtifactError::InvalidArtifact("decision tree has no nodes".to_string()));
    }

    for (index, node) in nodes.iter().enumerate() {
        if let TreeNode::Split { feature, threshold, left, right } = node {
            if *feature >= n_features {
                return Err(ArtifactError::InvalidArtifact(format!(
                    "node {index} splits on feature {feature}, model has {n_features}"
                )));
            }
            if !threshold.is_finite() {
                return Err(ArtifactError::InvalidArtifact(format!(
                    "node {index} has a non-finite threshold"
                )));
            }
            for child in [*left, *right] {
                if child <= index || child >= nodes.len() {
                    return Err(ArtifactError::InvalidArtifact(format!(
                        "node {index} points to invalid child {child}"
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Walk one row down a validated tree
fn predict_tree(nodes: &[TreeNode], row: ArrayView1<'_, f64>) -> i64 {
    let mut index = 0;
    loop {
        match &nodes[index] {
            TreeNode::Leaf { leaf } => return *leaf,
            TreeNode::Split { feature, threshold, left, right } => {
                index = if row[*feature] <= *threshold { *left } else { *right };
            }
        }
    }
}

/// Majority vote, ties go to the smaller label
fn majority(votes: impl Iterator<Item = i64>) -> Option<i64> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for label in votes {
        *counts.entry(label).or_default() += 1;
    }

    let mut best: Option<(i64, usize)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

// ============================================================================
// CLASSIFIER ARTIFACT
// ============================================================================

/// Serialized classifier as written by the training pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    /// Label 1 iff `coef · x + intercept > 0`
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
    DecisionTree {
        n_features: usize,
        nodes: Vec<TreeNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
    RandomForest {
        n_features: usize,
        trees: Vec<Vec<TreeNode>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
}

impl ClassifierArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierArtifact::LogisticRegression { .. } => "logistic_regression",
            ClassifierArtifact::DecisionTree { .. } => "decision_tree",
            ClassifierArtifact::RandomForest { .. } => "random_forest",
        }
    }

    /// Structural checks, independent of the feature layout
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            ClassifierArtifact::LogisticRegression { coef, intercept, .. } => {
                if coef.is_empty() {
                    return Err(ArtifactError::InvalidArtifact(
                        "logistic regression has no coefficients".to_string(),
                    ));
                }
                if coef.iter().any(|c| !c.is_finite()) || !intercept.is_finite() {
                    return Err(ArtifactError::InvalidArtifact(
                        "logistic regression contains non-finite parameters".to_string(),
                    ));
                }
            }
            ClassifierArtifact::DecisionTree { n_features, nodes, .. } => {
                validate_tree(nodes, *n_features)?;
            }
            ClassifierArtifact::RandomForest { n_features, trees, .. } => {
                if trees.is_empty() {
                    return Err(ArtifactError::InvalidArtifact(
                        "random forest has no trees".to_string(),
                    ));
                }
                for (i, tree) in trees.iter().enumerate() {
                    validate_tree(tree, *n_features).map_err(|e| {
                        ArtifactError::InvalidArtifact(format!("tree {i}: {e}"))
                    })?;
                }
            }
        }

        match self.feature_names() {
            Some(names) if names.len() != self.n_features() => {
                Err(ArtifactError::InvalidArtifact(format!(
                    "{} feature names for {} columns",
                    names.len(),
                    self.n_features()
                )))
            }
            _ => Ok(()),
        }
    }

    fn predict_row(&self, row: ArrayView1<'_, f64>) -> i64 {
        match self {
            ClassifierArtifact::LogisticRegression { coef, intercept, .. } => {
                let z: f64 = coef.iter().zip(row.iter()).map(|(c, x)| c * x).sum::<f64>() + intercept;
                i64::from(z > 0.0)
            }
            ClassifierArtifact::DecisionTree { nodes, .. } => predict_tree(nodes, row),
            ClassifierArtifact::RandomForest { trees, .. } => {
                // validate() rejects empty forests
                majority(trees.iter().map(|t| predict_tree(t, row))).unwrap_or(0)
            }
        }
    }
}

impl Classifier for ClassifierArtifact {
    fn n_features(&self) -> usize {
        match self {
            ClassifierArtifact::LogisticRegression { coef, .. } => coef.len(),
            ClassifierArtifact::DecisionTree { n_features, .. }
            | ClassifierArtifact::RandomForest { n_features, .. } => *n_features,
        }
    }

    fn feature_names(&self) -> Option<&[String]> {
        match self {
            ClassifierArtifact::LogisticRegression { feature_names, .. }
            | ClassifierArtifact::DecisionTree { feature_names, .. }
            | ClassifierArtifact::RandomForest { feature_names, .. } => feature_names.as_deref(),
        }
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>, InferenceError> {
        // Tree traversal indexes nodes and features directly
        self.validate()?;

        let expected = self.n_features();
        if x.ncols() != expected {
            return Err(InferenceError::ShapeMismatch {
                stage: "classifier",
                expected,
                actual: x.ncols(),
            });
        }

        Ok(x.rows().into_iter().map(|row| self.predict_row(row)).collect())
    }
}
