//! Feature and scenario definitions supplied by the configuration surface.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Climate pathway grouping that flood-model features are organized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Primary,
    Secondary,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Primary, Scenario::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Primary => "primary",
            Scenario::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One queryable flood-model indicator, e.g. a river flood model under a
/// specific climate pathway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDefinition {
    /// Attribute field name; unique across the configuration.
    pub field: String,
    /// Display label used as the chart series name.
    pub label: String,
    pub scenario: Scenario,
    /// Flood model family ("fluvial", "coastal", ...) shown in statistics.
    #[serde(default)]
    pub model_type: Option<String>,
    /// Marks the per-scenario "any flood model" indicator. Its count is the
    /// union of all models, so it feeds total-affected figures directly.
    #[serde(default)]
    pub union_indicator: bool,
}

impl FeatureDefinition {
    pub fn new(field: impl Into<String>, label: impl Into<String>, scenario: Scenario) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            scenario,
            model_type: None,
            union_indicator: false,
        }
    }

    pub fn with_model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }

    pub fn as_union_indicator(mut self) -> Self {
        self.union_indicator = true;
        self
    }

    /// Model type for statistics breakdowns, falling back to the field name.
    pub fn model_type_or_field(&self) -> &str {
        self.model_type.as_deref().unwrap_or(&self.field)
    }
}
