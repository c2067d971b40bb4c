//! Artifact Store - load-once cache for the scaler/classifier pair
//!
//! Constructed explicitly at startup and shared behind an `Arc`. The first
//! successful [`ArtifactStore::get`] reads both files; every later call
//! returns the same pair without touching storage. A failed load is not
//! cached, so nothing is ever served from a partially loaded state.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::{Classifier, ClassifierArtifact};
use super::scaler::{Scaler, ScalerArtifact};
use crate::error::ArtifactError;
use crate::features::layout::{validate_feature_names, FEATURE_COUNT};

/// Default classifier artifact file name
pub const DEFAULT_MODEL_PATH: &str = "final_motor_failure_model.json";

/// Default scaler artifact file name
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";

// ============================================================================
// SOURCE
// ============================================================================

/// Where artifact bytes come from
pub trait ArtifactSource: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<u8>, ArtifactError>;
}

/// Reads artifacts from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl ArtifactSource for FsSource {
    fn read(&self, path: &Path) -> Result<Vec<u8>, ArtifactError> {
        std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ============================================================================
// LOADED PAIR
// ============================================================================

/// Locations of the two artifact files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler: PathBuf::from(DEFAULT_SCALER_PATH),
        }
    }
}

/// Provenance of a loaded pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub model_path: String,
    pub model_kind: String,
    pub model_sha256: String,
    pub scaler_path: String,
    pub scaler_kind: String,
    pub scaler_sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// A validated scaler/classifier pair
#[derive(Debug)]
pub struct LoadedArtifacts {
    pub classifier: ClassifierArtifact,
    pub scaler: ScalerArtifact,
    pub metadata: ArtifactMetadata,
}

// ============================================================================
// STORE
// ============================================================================

pub struct ArtifactStore {
    paths: ArtifactPaths,
    source: Box<dyn ArtifactSource>,
    cell: OnceCell<Arc<LoadedArtifacts>>,
    loads: AtomicU64,
}

impl ArtifactStore {
    /// Store reading from the filesystem
    pub fn new(paths: ArtifactPaths) -> Self {
        Self::with_source(paths, FsSource)
    }

    pub fn with_source(paths: ArtifactPaths, source: impl ArtifactSource + 'static) -> Self {
        Self {
            paths,
            source: Box::new(source),
            cell: OnceCell::new(),
            loads: AtomicU64::new(0),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Cached pair, loading it on first use
    pub fn get(&self) -> Result<Arc<LoadedArtifacts>, ArtifactError> {
        self.cell
            .get_or_try_init(|| {
                let loaded = self.load()?;
                self.loads.fetch_add(1, Ordering::Relaxed);
                Ok(Arc::new(loaded))
            })
            .map(Arc::clone)
    }

    /// Pair if it has already been loaded, never touches storage
    pub fn loaded(&self) -> Option<Arc<LoadedArtifacts>> {
        self.cell.get().cloned()
    }

    /// Number of completed loads from storage (0 or 1)
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    fn load(&self) -> Result<LoadedArtifacts, ArtifactError> {
        log::info!(
            "Loading artifacts: model={}, scaler={}",
            self.paths.model.display(),
            self.paths.scaler.display()
        );

        let (classifier, model_sha256): (ClassifierArtifact, _) =
            read_artifact(self.source.as_ref(), &self.paths.model)?;
        let (scaler, scaler_sha256): (ScalerArtifact, _) =
            read_artifact(self.source.as_ref(), &self.paths.scaler)?;

        classifier.validate()?;
        scaler.validate()?;
        check_schema("classifier", classifier.n_features(), classifier.feature_names())?;
        check_schema("scaler", scaler.n_features(), scaler.feature_names())?;

        let metadata = ArtifactMetadata {
            model_path: self.paths.model.display().to_string(),
            model_kind: classifier.kind().to_string(),
            model_sha256,
            scaler_path: self.paths.scaler.display().to_string(),
            scaler_kind: scaler.kind().to_string(),
            scaler_sha256,
            loaded_at: Utc::now(),
        };

        log::info!(
            "Artifacts loaded: {} (sha256 {}), {} scaler (sha256 {})",
            metadata.model_kind,
            metadata.model_sha256,
            metadata.scaler_kind,
            metadata.scaler_sha256
        );

        Ok(LoadedArtifacts { classifier, scaler, metadata })
    }
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("paths", &self.paths)
            .field("loaded", &self.cell.get().is_some())
            .field("loads", &self.load_count())
            .finish()
    }
}

/// Read, hash and parse one artifact file
fn read_artifact<T: DeserializeOwned>(
    source: &dyn ArtifactSource,
    path: &Path,
) -> Result<(T, String), ArtifactError> {
    let bytes = source.read(path)?;
    let digest = hex::encode(Sha256::digest(&bytes));

    let artifact = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((artifact, digest))
}

/// Artifact must have been fit on the current feature layout
fn check_schema(
    what: &str,
    n_features: usize,
    names: Option<&[String]>,
) -> Result<(), ArtifactError> {
    if n_features != FEATURE_COUNT {
        return Err(ArtifactError::SchemaMismatch(format!(
            "{what} was fit on {n_features} features, layout has {FEATURE_COUNT}"
        )));
    }

    if let Some(names) = names {
        validate_feature_names(names)
            .map_err(|e| ArtifactError::SchemaMismatch(format!("{what}: {e}")))?;
    }

    Ok(())
}
