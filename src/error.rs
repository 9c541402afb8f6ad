//! Error types for configuration loading and trigger evaluation
//!
//! Errors split into two classes: [`ConfigError`] is surfaced when a
//! configuration or trigger expression is registered, [`EvalError`] is
//! reported per update when a streamed value cannot be coerced to the
//! type a trigger expects. Evaluation errors never crash the host and
//! leave rolling-window state untouched for that update.

use thiserror::Error;

/// Registration-time configuration errors.
///
/// A trigger or rule that fails with one of these is excluded from
/// evaluation rather than silently reporting always-false.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration document could not be parsed at all
    #[error("failed to parse configuration: {message}")]
    Parse { message: String },

    /// Trigger operand must be numeric for threshold and trend kinds
    #[error("trigger `{expression}`: operand `{operand}` is not a number")]
    NonNumericOperand { expression: String, operand: String },

    /// Trigger expression has a delimiter but no source path before it
    #[error("trigger `{expression}`: missing source path")]
    MissingPath { expression: String },

    /// A recognized option key carried a value of the wrong type
    #[error("option `{key}`: expected {expected}, got {found}")]
    BadOptionValue {
        key: String,
        expected: &'static str,
        found: String,
    },
}

/// Per-update evaluation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Threshold and trend triggers need a numeric value
    #[error("path `{path}`: expected a numeric value, got {found}")]
    NotNumeric { path: String, found: &'static str },

    /// State-equality triggers need a notification with a state field
    #[error("path `{path}`: expected a notification with a state field, got {found}")]
    NotANotification { path: String, found: &'static str },
}

/// Either class of trigger failure, for callers that parse and
/// evaluate an expression in a single step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
