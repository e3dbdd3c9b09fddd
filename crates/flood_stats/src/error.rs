// ---------------------------------------------------------------------------
// Error types for the aggregation engine and its configuration surface
// ---------------------------------------------------------------------------

use std::fmt;

use crate::config::Scenario;

/// Errors raised by the aggregation engine.
///
/// Every variant is a malformed configuration value passed by the caller.
/// Missing category data and zero denominators are normalized instead of
/// reported here.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// Metric name is not one of the recognized display metrics.
    InvalidMetric(String),
    /// Per-segment length is zero, negative, or not finite.
    InvalidUnit(f64),
    /// Category limit is neither a positive integer nor `"unlimited"`.
    InvalidCategoryLimit(String),
    /// Risk threshold bands are empty, unordered, or non-finite.
    InvalidRiskBands(String),
    /// The scenario has no feature flagged as its "any model" indicator.
    MissingUnionIndicator(Scenario),
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationError::InvalidMetric(name) => {
                write!(f, "Invalid metric: {name:?} (expected \"count\" or \"length\")")
            }
            AggregationError::InvalidUnit(unit) => {
                write!(f, "Invalid unit length: {unit} km (must be a positive finite number)")
            }
            AggregationError::InvalidCategoryLimit(raw) => write!(
                f,
                "Invalid category limit: {raw} (expected a positive integer or \"unlimited\")"
            ),
            AggregationError::InvalidRiskBands(msg) => write!(f, "Invalid risk bands: {msg}"),
            AggregationError::MissingUnionIndicator(scenario) => {
                write!(f, "No union indicator feature configured for {scenario} scenario")
            }
        }
    }
}

impl std::error::Error for AggregationError {}

/// Errors that can occur while loading a [`crate::config::DashboardConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the config schema.
    Parse(serde_json::Error),
    /// Two feature definitions share the same `field`.
    DuplicateFeature(String),
    /// The default category limit is not one of the selectable presets.
    UnknownDefaultLimit(String),
    /// A configured value failed engine validation.
    Invalid(AggregationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Config parse error: {e}"),
            ConfigError::DuplicateFeature(field) => {
                write!(f, "Duplicate feature field: {field}")
            }
            ConfigError::UnknownDefaultLimit(limit) => {
                write!(f, "Default category limit {limit} is not a configured preset")
            }
            ConfigError::Invalid(e) => write!(f, "Invalid config value: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<AggregationError> for ConfigError {
    fn from(e: AggregationError) -> Self {
        ConfigError::Invalid(e)
    }
}
