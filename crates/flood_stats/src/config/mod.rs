//! Dashboard configuration surface.
//!
//! Static, immutable inputs the engine is driven by:
//!
//! - **Features**: the flood-model indicators that can be charted, grouped by
//!   scenario, with one union indicator per scenario for statistics.
//! - **Category fields**: logical grouping field -> display label.
//! - **Category limits**: selectable "maximum categories" presets, with a
//!   single explicit `"unlimited"` sentinel.
//! - **Metrics**: selectable display metrics (segment count, total length).
//! - **Unit length**: fixed per-segment length used by the length metric.
//! - **Risk bands**: ascending percentage cut points for risk classification.
//!
//! Loaded from JSON with [`DashboardConfig::from_json`], which validates the
//! document before it can reach the engine.

pub(crate) mod constants;
mod types;


use std::collections::{BTreeMap, HashSet};
use std::num::NonZeroUsize;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::metric::{validate_unit, Metric};
use crate::ranking::CategoryLimit;
use crate::summary::RiskBands;

pub use constants::{DEFAULT_UNIT_LENGTH_KM, OTHER_LABEL, UNKNOWN_LABEL, UNLIMITED_SENTINEL};
pub use types::{FeatureDefinition, Scenario};

/// Complete dashboard configuration.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub features: Vec<FeatureDefinition>,
    #[serde(default)]
    pub category_fields: BTreeMap<String, String>,
    #[serde(default = "default_category_limits")]
    pub category_limits: Vec<CategoryLimit>,
    #[serde(default = "default_limit")]
    pub default_limit: CategoryLimit,
    #[serde(default = "default_metrics")]
    pub metrics: Vec<Metric>,
    #[serde(default = "default_unit_length_km")]
    pub unit_length_km: f64,
    #[serde(default)]
    pub risk_bands: RiskBands,
}

fn default_category_limits() -> Vec<CategoryLimit> {
    constants::DEFAULT_LIMIT_PRESETS
        .iter()
        .filter_map(|&n| NonZeroUsize::new(n))
        .map(CategoryLimit::Limited)
        .chain(std::iter::once(CategoryLimit::Unlimited))
        .collect()
}

fn default_limit() -> CategoryLimit {
    NonZeroUsize::new(constants::DEFAULT_LIMIT)
        .map(CategoryLimit::Limited)
        .unwrap_or(CategoryLimit::Unlimited)
}

fn default_metrics() -> Vec<Metric> {
    vec![Metric::SegmentCount, Metric::TotalLength]
}

fn default_unit_length_km() -> f64 {
    DEFAULT_UNIT_LENGTH_KM
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            category_fields: BTreeMap::new(),
            category_limits: default_category_limits(),
            default_limit: default_limit(),
            metrics: default_metrics(),
            unit_length_km: DEFAULT_UNIT_LENGTH_KM,
            risk_bands: RiskBands::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the engine would otherwise reject at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for feature in &self.features {
            if !seen.insert(feature.field.as_str()) {
                return Err(ConfigError::DuplicateFeature(feature.field.clone()));
            }
        }
        validate_unit(self.unit_length_km)?;
        self.risk_bands.validate()?;
        if !self.category_limits.contains(&self.default_limit) {
            return Err(ConfigError::UnknownDefaultLimit(self.default_limit.to_string()));
        }
        Ok(())
    }

    pub fn feature(&self, field: &str) -> Option<&FeatureDefinition> {
        self.features.iter().find(|f| f.field == field)
    }

    /// Features of one scenario, in configuration order.
    pub fn features_for(&self, scenario: Scenario) -> impl Iterator<Item = &FeatureDefinition> {
        self.features.iter().filter(move |f| f.scenario == scenario)
    }

    /// Features selectable as chart series (union indicators excluded).
    pub fn chartable_features(&self) -> impl Iterator<Item = &FeatureDefinition> {
        self.features.iter().filter(|f| !f.union_indicator)
    }

    /// Display label for a grouping field; unknown fields label themselves.
    pub fn category_field_label<'a>(&'a self, field: &'a str) -> &'a str {
        self.category_fields
            .get(field)
            .map(String::as_str)
            .unwrap_or(field)
    }
}
