//! Streamed telemetry values
//!
//! The upstream feed delivers one [`Value`] per update for a given path.
//! Tank levels arrive as plain numbers; alarm paths deliver structured
//! notifications carrying a `state` field.

use serde::{Deserialize, Serialize};

/// A structured notification payload with an alarm state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Alarm state (e.g. "normal", "alert", "warn", "alarm", "emergency")
    pub state: String,

    /// Optional human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

impl Notification {
    /// Create a notification with the given state
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            message: None,
        }
    }

    /// Attach a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A single value observed on a telemetry path.
///
/// Variant order matters for untagged deserialization: null, bool and
/// number are tried before text and structured payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Notification(Notification),
}

impl Value {
    /// Truthiness with the semantics of the original stream consumers:
    /// null, false, 0, NaN and the empty string are falsy, everything
    /// else (including any notification) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::Notification(_) => true,
        }
    }

    /// Numeric view, if this value is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Alarm state, if this value is a notification
    pub fn state(&self) -> Option<&str> {
        match self {
            Value::Notification(n) => Some(&n.state),
            _ => None,
        }
    }

    /// Short type name for error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Notification(_) => "notification",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Notification> for Value {
    fn from(n: Notification) -> Self {
        Value::Notification(n)
    }
}
