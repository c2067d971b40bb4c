//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! The scaler and classifier artifacts were fit on exactly this column
//! order. Reordering, adding or removing a name without refitting both
//! artifacts silently corrupts every prediction.
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the model input row
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Temperatures (0-1) ===
    "ambient",          // 0: Ambient temperature
    "coolant",          // 1: Coolant temperature

    // === Voltages (2-3) ===
    "u_d",              // 2: Direct-axis voltage
    "u_q",              // 3: Quadrature-axis voltage

    // === Mechanics (4-5) ===
    "motor_speed",      // 4: Rotor speed (RPM)
    "torque",           // 5: Torque (Nm)

    // === Currents (6-7) ===
    "i_d",              // 6: Direct-axis current
    "i_q",              // 7: Quadrature-axis current

    // === Component temperatures (8-11) ===
    "pm",               // 8: Permanent magnet
    "stator_yoke",      // 9
    "stator_tooth",     // 10
    "stator_winding",   // 11

    // === Trend (12-13) ===
    "pm_diff",          // 12: Always 0.0, no history in a single observation
    "pm_rate",          // 13: Always 0.0, no history in a single observation
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 14;

/// Index of `pm_diff` in the layout
pub const PM_DIFF_INDEX: usize = 12;

/// Index of `pm_rate` in the layout
pub const PM_RATE_INDEX: usize = 13;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
///
/// Version byte first, then every name followed by a NUL separator.
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for status output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Column names declared by an artifact do not match the layout
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("feature layout mismatch at column {position}: expected `{expected}`, found `{found}`")]
pub struct LayoutMismatchError {
    pub position: usize,
    pub expected: String,
    pub found: String,
}

/// Validate column names declared by an artifact against the layout
///
/// Name and position must both match; a shorter or longer list reports
/// the first missing or surplus column.
pub fn validate_feature_names<S: AsRef<str>>(names: &[S]) -> Result<(), LayoutMismatchError> {
    let len = names.len().max(FEATURE_COUNT);

    for position in 0..len {
        let expected = FEATURE_LAYOUT.get(position).copied();
        let found = names.get(position).map(|s| s.as_ref());

        if expected != found {
            return Err(LayoutMismatchError {
                position,
                expected: expected.unwrap_or("<none>").to_string(),
                found: found.unwrap_or("<none>").to_string(),
            });
        }
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 14);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_trend_indexes() {
        assert_eq!(feature_index("pm_diff"), Some(PM_DIFF_INDEX));
        assert_eq!(feature_index("pm_rate"), Some(PM_RATE_INDEX));
    }

    #[test]
    fn test_timestamp_not_in_layout() {
        assert_eq!(feature_index("timestamp"), None);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_feature_names_exact() {
        assert!(validate_feature_names(FEATURE_LAYOUT).is_ok());
    }

    #[test]
    fn test_validate_feature_names_swapped() {
        let mut names: Vec<&str> = FEATURE_LAYOUT.to_vec();
        names.swap(2, 3);

        let err = validate_feature_names(&names).unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.expected, "u_d");
        assert_eq!(err.found, "u_q");
    }

    #[test]
    fn test_validate_feature_names_truncated() {
        let names = &FEATURE_LAYOUT[..12];

        let err = validate_feature_names(names).unwrap_err();
        assert_eq!(err.position, 12);
        assert_eq!(err.found, "<none>");
    }

    #[test]
    fn test_validate_feature_names_extra_column() {
        let mut names: Vec<&str> = FEATURE_LAYOUT.to_vec();
        names.push("timestamp");

        let err = validate_feature_names(&names).unwrap_err();
        assert_eq!(err.position, 14);
        assert_eq!(err.expected, "<none>");
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
