//! Normalized result of one script execution.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a script decided about the push.
///
/// Only an explicit `false` is a veto. Scripts that return nothing, or
/// anything that is not a boolean, have no opinion and let the chain go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookOutcome {
    /// The script returned `true`.
    Accept,
    /// The script returned `false`.
    Reject,
    /// The script returned a non-boolean value or nothing.
    NoOpinion,
}

impl HookOutcome {
    /// Normalizes a dynamic script result.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(true) => Self::Accept,
            Value::Bool(false) => Self::Reject,
            _ => Self::NoOpinion,
        }
    }

    /// Returns the outcome as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::NoOpinion => "no_opinion",
        }
    }
}

impl From<&Value> for HookOutcome {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl fmt::Display for HookOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
