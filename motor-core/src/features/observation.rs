//! Observation Record - one set of collected operating parameters
//!
//! Built fresh for every request from whatever the caller submitted,
//! falling back to control defaults and clamping to control bounds.

use serde::{Deserialize, Serialize};

use super::controls::control;

// ============================================================================
// RAW INPUT
// ============================================================================

/// Partial observation as submitted by a client
///
/// Every field is optional; absent fields take their control default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationInput {
    pub ambient: Option<f64>,
    pub coolant: Option<f64>,
    pub u_d: Option<f64>,
    pub u_q: Option<f64>,
    pub motor_speed: Option<f64>,
    pub torque: Option<f64>,
    pub i_d: Option<f64>,
    pub i_q: Option<f64>,
    pub pm: Option<f64>,
    pub stator_yoke: Option<f64>,
    pub stator_tooth: Option<f64>,
    pub stator_winding: Option<f64>,
    pub timestamp: Option<f64>,
}

impl ObservationInput {
    /// Build from string key/value pairs (query string, form body)
    ///
    /// Unknown keys are ignored; values that do not parse as numbers are
    /// treated as absent.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut input = Self::default();
        for (key, raw) in pairs {
            let value = raw.trim().parse::<f64>().ok();
            if let Some(slot) = input.slot_mut(key) {
                *slot = value;
            }
        }
        input
    }

    /// Set a single field by name, returns false for unknown names
    pub fn set(&mut self, field: &str, value: f64) -> bool {
        match self.slot_mut(field) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    fn slot(&self, field: &str) -> Option<Option<f64>> {
        let value = match field {
            "ambient" => self.ambient,
            "coolant" => self.coolant,
            "u_d" => self.u_d,
            "u_q" => self.u_q,
            "motor_speed" => self.motor_speed,
            "torque" => self.torque,
            "i_d" => self.i_d,
            "i_q" => self.i_q,
            "pm" => self.pm,
            "stator_yoke" => self.stator_yoke,
            "stator_tooth" => self.stator_tooth,
            "stator_winding" => self.stator_winding,
            "timestamp" => self.timestamp,
            _ => return None,
        };
        Some(value)
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut Option<f64>> {
        let slot = match field {
            "ambient" => &mut self.ambient,
            "coolant" => &mut self.coolant,
            "u_d" => &mut self.u_d,
            "u_q" => &mut self.u_q,
            "motor_speed" => &mut self.motor_speed,
            "torque" => &mut self.torque,
            "i_d" => &mut self.i_d,
            "i_q" => &mut self.i_q,
            "pm" => &mut self.pm,
            "stator_yoke" => &mut self.stator_yoke,
            "stator_tooth" => &mut self.stator_tooth,
            "stator_winding" => &mut self.stator_winding,
            "timestamp" => &mut self.timestamp,
            _ => return None,
        };
        Some(slot)
    }
}

// ============================================================================
// OBSERVATION RECORD
// ============================================================================

/// One complete observation: 14 model features plus the timestamp
///
/// Immutable once built. `pm_diff` and `pm_rate` are always zero since a
/// single observation carries no history to derive a trend from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservationRecord {
    ambient: f64,
    coolant: f64,
    u_d: f64,
    u_q: f64,
    motor_speed: f64,
    torque: f64,
    i_d: f64,
    i_q: f64,
    pm: f64,
    stator_yoke: f64,
    stator_tooth: f64,
    stator_winding: f64,
    pm_diff: f64,
    pm_rate: f64,
    timestamp: i64,
}

impl ObservationRecord {
    /// Apply defaults and clamping to a partial input
    pub fn from_input(input: &ObservationInput) -> Self {
        let resolve = |field: &str| -> f64 {
            // Field names come from the control table, lookup cannot miss
            match control(field) {
                Some(c) => input
                    .slot(field)
                    .flatten()
                    .map(|v| c.clamp(v))
                    .unwrap_or(c.default),
                None => 0.0,
            }
        };

        Self {
            ambient: resolve("ambient"),
            coolant: resolve("coolant"),
            u_d: resolve("u_d"),
            u_q: resolve("u_q"),
            motor_speed: resolve("motor_speed"),
            torque: resolve("torque"),
            i_d: resolve("i_d"),
            i_q: resolve("i_q"),
            pm: resolve("pm"),
            stator_yoke: resolve("stator_yoke"),
            stator_tooth: resolve("stator_tooth"),
            stator_winding: resolve("stator_winding"),
            pm_diff: 0.0,
            pm_rate: 0.0,
            timestamp: resolve("timestamp") as i64,
        }
    }

    /// Get a numeric field by name (timestamp included)
    pub fn get(&self, field: &str) -> Option<f64> {
        let value = match field {
            "ambient" => self.ambient,
            "coolant" => self.coolant,
            "u_d" => self.u_d,
            "u_q" => self.u_q,
            "motor_speed" => self.motor_speed,
            "torque" => self.torque,
            "i_d" => self.i_d,
            "i_q" => self.i_q,
            "pm" => self.pm,
            "stator_yoke" => self.stator_yoke,
            "stator_tooth" => self.stator_tooth,
            "stator_winding" => self.stator_winding,
            "pm_diff" => self.pm_diff,
            "pm_rate" => self.pm_rate,
            "timestamp" => self.timestamp as f64,
            _ => return None,
        };
        Some(value)
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn motor_speed(&self) -> f64 {
        self.motor_speed
    }

    /// All 15 fields in display order: features first, timestamp last
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        super::layout::FEATURE_LAYOUT
            .iter()
            .chain(std::iter::once(&"timestamp"))
            .filter_map(|&name| self.get(name).map(|v| (name, v)))
            .collect()
    }
}

impl Default for ObservationRecord {
    fn default() -> Self {
        Self::from_input(&ObservationInput::default())
    }
}

impl From<&ObservationInput> for ObservationRecord {
    fn from(input: &ObservationInput) -> Self {
        Self::from_input(input)
    }
}
