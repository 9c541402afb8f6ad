//! Alert events emitted by the trigger engine

use std::time::Instant;

use crate::value::Value;

/// Event handed to a trigger's callback on every fresh verdict.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    /// Path the value was observed on
    pub path: String,
    /// The trigger expression that produced this verdict
    pub expression: String,
    /// Whether the alert condition is currently active
    pub active: bool,
    /// The value that was evaluated
    pub value: Value,
    /// When the verdict was produced
    pub timestamp: Instant,
}

impl AlertEvent {
    /// Create a new alert event
    pub fn new(
        path: impl Into<String>,
        expression: impl Into<String>,
        active: bool,
        value: Value,
    ) -> Self {
        Self {
            path: path.into(),
            expression: expression.into(),
            active,
            value,
            timestamp: Instant::now(),
        }
    }
}

/// Callback type for alert verdicts
pub type AlertCallback = Box<dyn Fn(AlertEvent) + Send + Sync>;
