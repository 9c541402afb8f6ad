//! Configuration-overlay resolution
//!
//! Panel configuration arrives as an ordered list of path-scoped
//! override rules ("tweaks"). This module computes the effective
//! option set for a single tank path by cascading every matching rule,
//! least specific first.

mod options;
mod resolver;

pub use options::{LabelDef, TankOptions};
pub use resolver::{resolve, OverrideRule};
