//! Model Module - fitted artifacts and the inference pipeline
//!
//! Scaler and classifier are opaque to the rest of the crate: they are
//! reached only through the [`Scaler`] and [`Classifier`] traits.

pub mod artifacts;
pub mod classifier;
pub mod inference;
pub mod scaler;
pub mod verdict;


// Re-export common types
pub use artifacts::{
    ArtifactMetadata, ArtifactPaths, ArtifactSource, ArtifactStore, FsSource, LoadedArtifacts,
};
pub use classifier::{Classifier, ClassifierArtifact, TreeNode};
pub use inference::{predict, EngineStatus, Pipeline, Prediction};
pub use scaler::{Scaler, ScalerArtifact};
pub use verdict::Verdict;
