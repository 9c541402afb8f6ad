//! Trigger expression parsing
//!
//! A trigger expression is a compact string naming one source path, an
//! operator and an operand, e.g. `tanks.0.currentLevel<0.2`. The
//! expression is parsed once at registration into a [`Trigger`]
//! variant; evaluation is then a pattern match, never a re-scan of the
//! string.

use crate::error::ConfigError;

/// Paths under this prefix are alarm notifications; their raw
/// truthiness is the verdict, whatever the rest of the string says.
pub const NOTIFICATION_PREFIX: &str = "notifications.";

/// A parsed trigger expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Verdict is the incoming value's truthiness
    Passthrough { path: String },

    /// Active iff the incoming notification's state equals `state`
    StateEquals { path: String, state: String },

    /// Active iff the incoming value is below the threshold
    LessThan { path: String, threshold: f64 },

    /// Active iff the incoming value is above the threshold
    GreaterThan { path: String, threshold: f64 },

    /// Active iff the incoming value exceeds the trailing mean by more
    /// than `delta`, once the window has warmed up
    RisingTrend { path: String, delta: f64 },

    /// Active iff the incoming value falls below the trailing mean by
    /// more than `delta`, once the window has warmed up
    FallingTrend { path: String, delta: f64 },
}

impl Trigger {
    /// Parse an expression into its trigger kind.
    ///
    /// Delimiters are tested in priority order `:`, `<`, `>`, `+`, `-`
    /// and split at their first occurrence. An expression with no
    /// recognized delimiter, or one anchored under `notifications.`,
    /// is a truthiness passthrough. A non-numeric operand where a
    /// number is required fails here, at registration time.
    pub fn parse(expression: &str) -> Result<Self, ConfigError> {
        if expression.starts_with(NOTIFICATION_PREFIX) {
            // Still a passthrough if a delimiter follows, but the
            // trigger anchors to the pre-delimiter source path.
            let end = expression
                .find([':', '<', '>', '+', '-'])
                .unwrap_or(expression.len());
            return Ok(Trigger::Passthrough {
                path: expression[..end].to_string(),
            });
        }

        if let Some(pos) = expression.find(':') {
            let (path, operand) = split_expression(expression, pos)?;
            return Ok(Trigger::StateEquals {
                path,
                state: operand.to_string(),
            });
        }
        if let Some(pos) = expression.find('<') {
            let (path, operand) = split_expression(expression, pos)?;
            return Ok(Trigger::LessThan {
                path,
                threshold: numeric_operand(expression, operand)?,
            });
        }
        if let Some(pos) = expression.find('>') {
            let (path, operand) = split_expression(expression, pos)?;
            return Ok(Trigger::GreaterThan {
                path,
                threshold: numeric_operand(expression, operand)?,
            });
        }
        if let Some(pos) = expression.find('+') {
            let (path, operand) = split_expression(expression, pos)?;
            return Ok(Trigger::RisingTrend {
                path,
                delta: numeric_operand(expression, operand)?,
            });
        }
        if let Some(pos) = expression.find('-') {
            let (path, operand) = split_expression(expression, pos)?;
            return Ok(Trigger::FallingTrend {
                path,
                delta: numeric_operand(expression, operand)?,
            });
        }

        Ok(Trigger::Passthrough {
            path: expression.to_string(),
        })
    }

    /// The source path this trigger is anchored to
    pub fn path(&self) -> &str {
        match self {
            Trigger::Passthrough { path }
            | Trigger::StateEquals { path, .. }
            | Trigger::LessThan { path, .. }
            | Trigger::GreaterThan { path, .. }
            | Trigger::RisingTrend { path, .. }
            | Trigger::FallingTrend { path, .. } => path,
        }
    }
}

fn split_expression(expression: &str, pos: usize) -> Result<(String, &str), ConfigError> {
    let path = &expression[..pos];
    if path.is_empty() {
        return Err(ConfigError::MissingPath {
            expression: expression.to_string(),
        });
    }
    Ok((path.to_string(), &expression[pos + 1..]))
}

fn numeric_operand(expression: &str, operand: &str) -> Result<f64, ConfigError> {
    operand
        .parse::<f64>()
        .map_err(|_| ConfigError::NonNumericOperand {
            expression: expression.to_string(),
            operand: operand.to_string(),
        })
}
