//! Verdict - what a predicted label means to the operator

use serde::{Deserialize, Serialize};

pub const FAILURE_MESSAGE: &str = "⚠️ Alert! Possible failure detected in the motor.";
pub const NORMAL_MESSAGE: &str = "✅ The motor is operating normally.";

/// Label value that signals a failure
pub const FAILURE_LABEL: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Failure,
    Normal,
}

impl Verdict {
    /// Label 1 is a failure, anything else is normal operation
    pub fn from_label(label: i64) -> Self {
        if label == FAILURE_LABEL {
            Verdict::Failure
        } else {
            Verdict::Normal
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Failure => FAILURE_MESSAGE,
            Verdict::Normal => NORMAL_MESSAGE,
        }
    }

    /// Display style: warning for failures, success otherwise
    pub fn style(&self) -> &'static str {
        match self {
            Verdict::Failure => "warning",
            Verdict::Normal => "success",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Verdict::Failure)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
