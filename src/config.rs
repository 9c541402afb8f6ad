//! Panel configuration loading
//!
//! The panel is configured by a document carrying an ordered list of
//! tweak rules. Rules arrive as flat objects with an optional `path`
//! key plus arbitrary option keys; loading converts them into typed
//! [`OverrideRule`]s, dropping unrecognized keys with a warning and
//! rejecting recognized keys whose values have the wrong type. Trigger
//! expressions embedded in labels are validated here, so a malformed
//! trigger is a load-time error rather than a silent per-update
//! failure.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::overlay::{LabelDef, OverrideRule, TankOptions};
use crate::triggers::Trigger;

/// A tweak rule as it appears on the wire: a path plus a free-form
/// property bag.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRule {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(flatten)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl RawRule {
    /// Convert into a typed rule, warning on unrecognized keys.
    pub fn into_rule(self) -> Result<OverrideRule, ConfigError> {
        let mut options = TankOptions::default();

        for (key, value) in self.properties {
            match key.as_str() {
                "ignore" => options.ignore = Some(coerce_bool(&key, &value)?),
                "name" => options.name = Some(coerce_string(&key, &value)?),
                "factor" => options.factor = Some(coerce_number(&key, &value)?),
                "places" => options.places = Some(coerce_places(&key, &value)?),
                "color" => options.color = Some(coerce_string(&key, &value)?),
                "log" => options.log = Some(coerce_bool(&key, &value)?),
                "labels" => options.labels = Some(coerce_labels(&key, value)?),
                other => {
                    log::warn!("ignoring unrecognized tweak option `{}`", other);
                }
            }
        }

        Ok(OverrideRule {
            path: self.path,
            options,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawPanelConfig {
    #[serde(default)]
    tweaks: Vec<RawRule>,
}

/// Parsed panel configuration: the ordered override rule list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelConfig {
    pub tweaks: Vec<OverrideRule>,
}

impl PanelConfig {
    /// Load from a JSON document (the panel's native config format)
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let raw: RawPanelConfig =
            serde_json::from_str(input).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            })?;
        Self::from_raw(raw)
    }

    /// Load from a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: RawPanelConfig = toml::from_str(input).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawPanelConfig) -> Result<Self, ConfigError> {
        let tweaks = raw
            .tweaks
            .into_iter()
            .map(RawRule::into_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tweaks })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn coerce_bool(key: &str, value: &serde_json::Value) -> Result<bool, ConfigError> {
    value.as_bool().ok_or_else(|| ConfigError::BadOptionValue {
        key: key.to_string(),
        expected: "a boolean",
        found: json_kind(value).to_string(),
    })
}

fn coerce_string(key: &str, value: &serde_json::Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::BadOptionValue {
            key: key.to_string(),
            expected: "a string",
            found: json_kind(value).to_string(),
        })
}

fn coerce_number(key: &str, value: &serde_json::Value) -> Result<f64, ConfigError> {
    value.as_f64().ok_or_else(|| ConfigError::BadOptionValue {
        key: key.to_string(),
        expected: "a number",
        found: json_kind(value).to_string(),
    })
}

fn coerce_places(key: &str, value: &serde_json::Value) -> Result<u32, ConfigError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ConfigError::BadOptionValue {
            key: key.to_string(),
            expected: "a non-negative integer",
            found: json_kind(value).to_string(),
        })
}

fn coerce_labels(key: &str, value: serde_json::Value) -> Result<Vec<LabelDef>, ConfigError> {
    let found = json_kind(&value).to_string();
    let labels: Vec<LabelDef> =
        serde_json::from_value(value).map_err(|_| ConfigError::BadOptionValue {
            key: key.to_string(),
            expected: "a list of label definitions",
            found,
        })?;

    // Validate embedded trigger expressions now, not per update.
    for label in &labels {
        if let Some(trigger) = &label.trigger {
            Trigger::parse(trigger)?;
        }
    }

    Ok(labels)
}
