//! Features Module - from submitted form values to the model input row
//!
//! controls → observation → vector. The layout file is the single source
//! of truth for column order.

pub mod controls;
pub mod layout;
pub mod observation;
pub mod vector;

// Re-export common types
pub use controls::{Control, ControlKind, CONTROLS};
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use observation::{ObservationInput, ObservationRecord};
pub use vector::FeatureVector;
