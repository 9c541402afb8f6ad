//! Typed tank display options

use serde::{Deserialize, Serialize};

/// A label attached to a tank card, optionally bound to a trigger
/// expression that controls its visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelDef {
    /// Label content: an image reference or literal text
    #[serde(default)]
    pub content: Option<String>,

    /// Trigger expression that shows/hides the label
    #[serde(default)]
    pub trigger: Option<String>,
}

impl LabelDef {
    /// Create a label with the given content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            trigger: None,
        }
    }

    /// Bind a trigger expression to this label
    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Whether the content names an SVG icon rather than literal text
    pub fn is_icon(&self) -> bool {
        self.content
            .as_deref()
            .map(|c| c.contains(".svg"))
            .unwrap_or(false)
    }
}

/// The closed set of recognized per-tank options.
///
/// Every field is optional; [`TankOptions::merge`] overwrites
/// field-by-field so a more specific rule only replaces the options it
/// actually sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TankOptions {
    /// Skip this tank entirely
    #[serde(default)]
    pub ignore: Option<bool>,

    /// Display name override
    #[serde(default)]
    pub name: Option<String>,

    /// Scale factor applied before display
    #[serde(default)]
    pub factor: Option<f64>,

    /// Decimal places for displayed values
    #[serde(default)]
    pub places: Option<u32>,

    /// Bar color
    #[serde(default)]
    pub color: Option<String>,

    /// Whether historical graphs are available for this tank
    #[serde(default)]
    pub log: Option<bool>,

    /// Labels shown on the tank card
    #[serde(default)]
    pub labels: Option<Vec<LabelDef>>,
}

impl TankOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the scale factor
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = Some(factor);
        self
    }

    /// Set the number of decimal places
    pub fn with_places(mut self, places: u32) -> Self {
        self.places = Some(places);
        self
    }

    /// Set the bar color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Mark the tank ignored
    pub fn with_ignore(mut self, ignore: bool) -> Self {
        self.ignore = Some(ignore);
        self
    }

    /// Mark historical graphs available
    pub fn with_log(mut self, log: bool) -> Self {
        self.log = Some(log);
        self
    }

    /// Set the card labels
    pub fn with_labels(mut self, labels: Vec<LabelDef>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Overwrite each option that `other` sets, keeping the rest.
    /// Labels are replaced wholesale, not concatenated.
    pub fn merge(&mut self, other: &TankOptions) {
        if other.ignore.is_some() {
            self.ignore = other.ignore;
        }
        if other.name.is_some() {
            self.name = other.name.clone();
        }
        if other.factor.is_some() {
            self.factor = other.factor;
        }
        if other.places.is_some() {
            self.places = other.places;
        }
        if other.color.is_some() {
            self.color = other.color.clone();
        }
        if other.log.is_some() {
            self.log = other.log;
        }
        if other.labels.is_some() {
            self.labels = other.labels.clone();
        }
    }

    /// Effective scale factor (defaults to 1)
    pub fn factor(&self) -> f64 {
        self.factor.unwrap_or(1.0)
    }

    /// Effective decimal places (defaults to 0)
    pub fn places(&self) -> u32 {
        self.places.unwrap_or(0)
    }

    /// Whether this tank is ignored
    pub fn is_ignored(&self) -> bool {
        self.ignore.unwrap_or(false)
    }

    /// Whether historical graphs are available
    pub fn log_enabled(&self) -> bool {
        self.log.unwrap_or(false)
    }
}
