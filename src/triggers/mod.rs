//! Trigger expressions and streaming evaluation
//!
//! This module turns compact trigger expressions into parsed
//! [`Trigger`] variants and evaluates them against a live value
//! stream, maintaining bounded rolling statistics for trend detection.

mod engine;
mod expr;
mod window;

pub use engine::{evaluate, EngineState, TriggerEngine};
pub use expr::{Trigger, NOTIFICATION_PREFIX};
pub use window::{RollingWindow, WINDOW_CAPACITY};
