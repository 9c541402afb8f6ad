//! Override rule cascade

use serde::{Deserialize, Serialize};

use super::TankOptions;

/// A path-scoped set of option overrides.
///
/// A rule without a `path` is a default rule: it matches every tank
/// and has the lowest precedence. A rule with a `path` matches any
/// tank path it is a literal string prefix of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideRule {
    /// Path prefix this rule applies to; absent matches everything
    #[serde(default)]
    pub path: Option<String>,

    /// The options this rule contributes
    #[serde(flatten)]
    pub options: TankOptions,
}

impl OverrideRule {
    /// Create a default rule that matches every path
    pub fn default_rule(options: TankOptions) -> Self {
        Self {
            path: None,
            options,
        }
    }

    /// Create a rule scoped to a path prefix
    pub fn for_path(path: impl Into<String>, options: TankOptions) -> Self {
        Self {
            path: Some(path.into()),
            options,
        }
    }
}

/// Compute the effective options for `path` by cascading every
/// matching rule, least specific first.
///
/// Rules are ordered by ascending path length with a stable sort, so
/// default rules apply first and rules with equal-length paths keep
/// their input order. Matching is a literal string prefix test, not
/// segment-aware: a rule for `tanks.1` also matches
/// `tanks.12.currentLevel`. Later matches overwrite earlier ones
/// option-by-option.
///
/// The input list is borrowed and never reordered, so repeated calls
/// with the same inputs yield identical results.
pub fn resolve(path: &str, rules: &[OverrideRule]) -> TankOptions {
    let mut ordered: Vec<&OverrideRule> = rules.iter().collect();
    // Absent path sorts below any defined path, including "".
    ordered.sort_by_key(|rule| rule.path.as_ref().map_or(0, |p| p.len() + 1));

    let mut effective = TankOptions::default();
    for rule in ordered {
        let applies = match &rule.path {
            None => true,
            Some(prefix) => path.starts_with(prefix.as_str()),
        };
        if applies {
            effective.merge(&rule.options);
        }
    }
    effective
}
