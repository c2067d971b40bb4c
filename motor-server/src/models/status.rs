//! Model status API model

use motor_core::model::{ArtifactMetadata, EngineStatus};
use motor_core::LayoutInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStatusResponse {
    pub artifacts: Option<ArtifactMetadata>,
    pub layout: LayoutInfo,
    pub engine: EngineStatus,
}
