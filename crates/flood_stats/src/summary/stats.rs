//! Scenario-level totals and per-model breakdowns.

use std::collections::BTreeMap;

use bevy::log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{FeatureDefinition, Scenario};
use crate::error::AggregationError;
use crate::metric::validate_unit;

use super::risk::RiskBands;

/// Segment count for one flood model within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCount {
    pub label: String,
    pub model_type: String,
    pub count: u64,
}

/// Segments affected by any model in the scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedTotals {
    pub count: u64,
    pub length_km: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBreakdown {
    pub label: String,
    pub count: u64,
    pub length_km: f64,
    pub percentage: f64,
    pub model_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStatistic {
    pub scenario: Scenario,
    pub total_affected: AffectedTotals,
    /// Models with a nonzero count, in input order.
    pub model_breakdown: Vec<ModelBreakdown>,
}

impl ScenarioStatistic {
    /// Risk level of the scenario's total affected percentage.
    pub fn risk_level<'a>(&self, bands: &'a RiskBands) -> Option<&'a str> {
        bands.classify(self.total_affected.percentage)
    }
}

/// `count` as a percentage of `total`, or `0` when `total` is zero.
///
/// Clamped to 100 when an upstream count exceeds the network size.
pub fn percentage_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 * 100.0 / total as f64;
    if pct > 100.0 {
        warn!(
            "percentage_of: count {} exceeds network total {}, clamping to 100%",
            count, total
        );
        return 100.0;
    }
    pct
}

/// Summarize one scenario.
///
/// `any_model_count` is the union indicator's count. It is kept independent
/// of the per-model counts because a segment may match several models.
pub fn summarize(
    scenario: Scenario,
    any_model_count: u64,
    models: &[ModelCount],
    total_network_count: u64,
    unit_length_km: f64,
) -> Result<ScenarioStatistic, AggregationError> {
    let unit = validate_unit(unit_length_km)?;

    let total_affected = AffectedTotals {
        count: any_model_count,
        length_km: any_model_count as f64 * unit,
        percentage: percentage_of(any_model_count, total_network_count),
    };

    let model_breakdown = models
        .iter()
        .filter(|model| model.count > 0)
        .map(|model| ModelBreakdown {
            label: model.label.clone(),
            count: model.count,
            length_km: model.count as f64 * unit,
            percentage: percentage_of(model.count, total_network_count),
            model_type: model.model_type.clone(),
        })
        .collect();

    Ok(ScenarioStatistic {
        scenario,
        total_affected,
        model_breakdown,
    })
}

/// Summarize `scenario` from configured features and per-field counts.
///
/// The scenario's union indicator supplies the total; every other feature
/// of the scenario becomes a breakdown model. Fields missing from
/// `counts_by_field` count as zero.
pub fn summarize_scenario(
    scenario: Scenario,
    features: &[FeatureDefinition],
    counts_by_field: &BTreeMap<String, u64>,
    total_network_count: u64,
    unit_length_km: f64,
) -> Result<ScenarioStatistic, AggregationError> {
    let count_of = |field: &str| counts_by_field.get(field).copied().unwrap_or(0);

    let union = features
        .iter()
        .find(|f| f.scenario == scenario && f.union_indicator)
        .ok_or(AggregationError::MissingUnionIndicator(scenario))?;

    let models: Vec<ModelCount> = features
        .iter()
        .filter(|f| f.scenario == scenario && !f.union_indicator)
        .map(|f| ModelCount {
            label: f.label.clone(),
            model_type: f.model_type_or_field().to_string(),
            count: count_of(f.field.as_str()),
        })
        .collect();

    summarize(
        scenario,
        count_of(union.field.as_str()),
        &models,
        total_network_count,
        unit_length_km,
    )
}
