//! Conversion of raw segment counts into the caller-selected display metric.
//!
//! Values are never rounded here; rounding is a display concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AggregationError;
use crate::ingest::RawCountRecord;

/// Display metric selectable on chart and statistics panels.
///
/// Deserializes through [`FromStr`], so `"count"` and `"length"` are accepted
/// and unknown names report [`AggregationError::InvalidMetric`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum Metric {
    /// Number of affected road segments.
    SegmentCount,
    /// Affected network length in kilometres (`count * unit_length_km`).
    TotalLength,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::SegmentCount => "segmentCount",
            Metric::TotalLength => "totalLength",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "count" | "segmentCount" => Ok(Metric::SegmentCount),
            "length" | "totalLength" => Ok(Metric::TotalLength),
            other => Err(AggregationError::InvalidMetric(other.to_string())),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = AggregationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A raw count record plus its value in the selected metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub record: RawCountRecord,
    pub value: f64,
}

/// Reject per-segment lengths that would corrupt length statistics.
pub fn validate_unit(unit_length_km: f64) -> Result<f64, AggregationError> {
    if unit_length_km.is_finite() && unit_length_km > 0.0 {
        Ok(unit_length_km)
    } else {
        Err(AggregationError::InvalidUnit(unit_length_km))
    }
}

/// Convert a single count. Assumes `unit_length_km` was validated.
pub fn derive_value(count: u64, metric: Metric, unit_length_km: f64) -> f64 {
    match metric {
        Metric::SegmentCount => count as f64,
        Metric::TotalLength => count as f64 * unit_length_km,
    }
}

/// Convert every record to `metric`, preserving input order.
///
/// The unit length is validated for both metrics so a misconfigured
/// constant surfaces immediately rather than on the first length request.
pub fn derive(
    records: &[RawCountRecord],
    metric: Metric,
    unit_length_km: f64,
) -> Result<Vec<DerivedRecord>, AggregationError> {
    let unit = validate_unit(unit_length_km)?;
    Ok(records
        .iter()
        .map(|record| DerivedRecord {
            value: derive_value(record.count, metric, unit),
            record: record.clone(),
        })
        .collect())
}
