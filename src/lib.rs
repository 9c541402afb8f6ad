//! Tank Monitor core
//!
//! Core logic for a live tank-level dashboard panel driven by a
//! streaming telemetry feed. Two independent components, composed by
//! the surrounding panel code:
//!
//! - [`overlay::resolve`] computes the effective per-tank
//!   configuration by cascading path-scoped override rules.
//! - [`triggers::TriggerEngine`] evaluates compact trigger expressions
//!   against incoming values and reports active/inactive verdicts
//!   through alert callbacks, keeping bounded rolling statistics for
//!   trend triggers.
//!
//! The telemetry connection, DOM construction and rendering stay
//! outside this crate; it only consumes "a value arrived for path P"
//! and an already-fetched configuration document.

pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod overlay;
pub mod triggers;
pub mod value;

// Re-export commonly used types
pub use config::PanelConfig;
pub use error::{ConfigError, EvalError, TriggerError};
pub use events::{AlertCallback, AlertEvent};
pub use overlay::{resolve, LabelDef, OverrideRule, TankOptions};
pub use triggers::{EngineState, RollingWindow, Trigger, TriggerEngine, WINDOW_CAPACITY};
pub use value::{Notification, Value};
