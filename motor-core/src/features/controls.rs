//! Input Controls - fixed bounds and defaults for every collected field
//!
//! The form renders one control per entry, in this order. Values never
//! leave `[min, max]`: anything submitted outside the domain is clamped.

use serde::Serialize;

/// Kind of input widget a control renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Slider,
    Integer,
}

/// One labeled input control
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Control {
    pub field: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl Control {
    const fn slider(field: &'static str, label: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self { field, label, kind: ControlKind::Slider, min, max, default, step: 0.1 }
    }

    /// Clamp a submitted value into this control's domain
    ///
    /// Non-finite input falls back to the default. Integer controls round
    /// to the nearest whole number.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }

        let value = match self.kind {
            ControlKind::Slider => value,
            ControlKind::Integer => value.round(),
        };

        value.clamp(self.min, self.max)
    }
}

/// Default timestamp (2021-09-30T16:00:01Z)
pub const DEFAULT_TIMESTAMP: i64 = 1_633_017_601;

/// Minimum timestamp accepted by the form
pub const MIN_TIMESTAMP: i64 = 1;

/// Control table in display order
pub const CONTROLS: [Control; 13] = [
    Control::slider("ambient", "Ambient temperature (°C)", 20.0, 40.0, 28.5),
    Control::slider("coolant", "Coolant temperature (°C)", 20.0, 80.0, 35.0),
    Control::slider("u_d", "Direct voltage (u_d)", -300.0, 300.0, -220.0),
    Control::slider("u_q", "Quadrature voltage (u_q)", -300.0, 300.0, 160.0),
    Control::slider("motor_speed", "Motor speed (RPM)", 0.0, 4000.0, 3200.0),
    Control::slider("torque", "Torque (Nm)", 0.0, 200.0, 75.0),
    Control::slider("i_d", "Direct current (i_d)", -200.0, 200.0, -110.0),
    Control::slider("i_q", "Quadrature current (i_q)", -200.0, 200.0, 110.0),
    Control::slider("pm", "Permanent magnet temperature (°C)", 20.0, 200.0, 155.0),
    Control::slider("stator_yoke", "Stator yoke temperature (°C)", 20.0, 200.0, 140.0),
    Control::slider("stator_tooth", "Stator tooth temperature (°C)", 20.0, 200.0, 145.0),
    Control::slider("stator_winding", "Stator winding temperature (°C)", 20.0, 200.0, 150.0),
    Control {
        field: "timestamp",
        label: "Timestamp",
        kind: ControlKind::Integer,
        min: MIN_TIMESTAMP as f64,
        // i64 values above 2^53 lose precision as f64; far beyond any real timestamp
        max: 9_007_199_254_740_992.0,
        default: DEFAULT_TIMESTAMP as f64,
        step: 1.0,
    },
];

/// Look up a control by field name
pub fn control(field: &str) -> Option<&'static Control> {
    CONTROLS.iter().find(|c| c.field == field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::layout::{feature_index, PM_DIFF_INDEX};

    #[test]
    fn test_controls_cover_user_fields() {
        assert_eq!(CONTROLS.len(), 13);

        // Every slider is a model feature, placed before the trend columns
        for c in CONTROLS.iter().filter(|c| c.kind == ControlKind::Slider) {
            let index = feature_index(c.field).expect("slider must be a feature");
            assert!(index < PM_DIFF_INDEX);
        }

        assert!(control("pm_diff").is_none());
        assert!(control("pm_rate").is_none());
    }

    #[test]
    fn test_defaults_within_bounds() {
        for c in CONTROLS.iter() {
            assert!(c.min <= c.default && c.default <= c.max, "{}", c.field);
        }
    }

    #[test]
    fn test_clamp_slider() {
        let speed = control("motor_speed").unwrap();
        assert_eq!(speed.clamp(9000.0), 4000.0);
        assert_eq!(speed.clamp(-5.0), 0.0);
        assert_eq!(speed.clamp(1234.5), 1234.5);
        assert_eq!(speed.clamp(f64::NAN), 3200.0);
    }

    #[test]
    fn test_clamp_timestamp() {
        let ts = control("timestamp").unwrap();
        assert_eq!(ts.clamp(0.0), 1.0);
        assert_eq!(ts.clamp(-100.0), 1.0);
        assert_eq!(ts.clamp(42.4), 42.0);
        assert_eq!(ts.default, DEFAULT_TIMESTAMP as f64);
    }
}
