//! Risk classification bands over percentage-of-network figures.

use serde::{Deserialize, Serialize};

use crate::config::constants::DEFAULT_RISK_CUT_POINTS;
use crate::error::AggregationError;

/// A risk level that applies from `min_percentage` up to the next band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBand {
    pub min_percentage: f64,
    pub label: String,
}

/// Ascending risk bands. The first band starts at 0%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskBands {
    bands: Vec<RiskBand>,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            bands: DEFAULT_RISK_CUT_POINTS
                .iter()
                .map(|&(min_percentage, label)| RiskBand {
                    min_percentage,
                    label: label.to_string(),
                })
                .collect(),
        }
    }
}

impl RiskBands {
    pub fn new(bands: Vec<RiskBand>) -> Result<Self, AggregationError> {
        let bands = Self { bands };
        bands.validate()?;
        Ok(bands)
    }

    /// Bands must be non-empty, start at 0, and strictly ascend.
    pub fn validate(&self) -> Result<(), AggregationError> {
        let first = self
            .bands
            .first()
            .ok_or_else(|| AggregationError::InvalidRiskBands("no bands configured".to_string()))?;
        if first.min_percentage != 0.0 {
            return Err(AggregationError::InvalidRiskBands(format!(
                "first band {:?} starts at {} instead of 0",
                first.label, first.min_percentage
            )));
        }
        for band in &self.bands {
            if !band.min_percentage.is_finite() || band.min_percentage > 100.0 {
                return Err(AggregationError::InvalidRiskBands(format!(
                    "band {:?} has out-of-range threshold {}",
                    band.label, band.min_percentage
                )));
            }
        }
        for pair in self.bands.windows(2) {
            if pair[1].min_percentage <= pair[0].min_percentage {
                return Err(AggregationError::InvalidRiskBands(format!(
                    "band {:?} ({}) does not ascend from {:?} ({})",
                    pair[1].label, pair[1].min_percentage, pair[0].label, pair[0].min_percentage
                )));
            }
        }
        Ok(())
    }

    pub fn bands(&self) -> &[RiskBand] {
        &self.bands
    }

    /// Label of the highest band whose threshold `percentage` reaches.
    ///
    /// `None` only for unvalidated bands or a negative/NaN percentage.
    pub fn classify(&self, percentage: f64) -> Option<&str> {
        self.bands
            .iter()
            .rev()
            .find(|band| percentage >= band.min_percentage)
            .map(|band| band.label.as_str())
    }
}
