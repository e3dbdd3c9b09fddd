//! Built-in defaults for the dashboard configuration surface.

/// Fixed length of one road-network segment, in kilometres.
pub const DEFAULT_UNIT_LENGTH_KM: f64 = 0.1;

/// Label of the synthetic overflow bucket created by category ranking.
pub const OTHER_LABEL: &str = "Other";

/// Category substituted for missing, null or blank source values.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// The one accepted spelling of "no category limit".
pub const UNLIMITED_SENTINEL: &str = "unlimited";

/// Selectable "maximum categories" presets (the unlimited preset is appended).
pub(crate) const DEFAULT_LIMIT_PRESETS: [usize; 4] = [5, 10, 15, 20];

/// Preset selected when the dashboard first opens.
pub(crate) const DEFAULT_LIMIT: usize = 10;

/// Ascending risk cut points as (minimum percentage of network, label).
pub(crate) const DEFAULT_RISK_CUT_POINTS: [(f64, &str); 4] = [
    (0.0, "Low"),
    (5.0, "Moderate"),
    (15.0, "High"),
    (25.0, "Severe"),
];
