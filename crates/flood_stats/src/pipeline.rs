//! End-to-end aggregation for one chart or statistics request.
//!
//! Composes ingest -> derive -> rank -> build for charts, and the summarizer
//! for each requested scenario. Identical inputs always yield identical,
//! order-stable outputs, so a caller may discard a stale computation at any
//! point without leaving partial state behind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{DashboardConfig, FeatureDefinition, Scenario};
use crate::error::AggregationError;
use crate::ingest::{ingest, RawCountRow};
use crate::metric::{derive, Metric};
use crate::ranking::{rank, CategoryLimit};
use crate::series::{build, ChartKind, ChartSeries};
use crate::summary::{summarize_scenario, ScenarioStatistic};

/// User selections on the chart panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub metric: Metric,
    pub limit: CategoryLimit,
    pub unit_length_km: f64,
    #[serde(default)]
    pub kind: ChartKind,
}

impl ChartOptions {
    /// Options for `metric` using the config's default limit and unit length.
    pub fn from_config(config: &DashboardConfig, metric: Metric) -> Self {
        Self {
            metric,
            limit: config.default_limit,
            unit_length_km: config.unit_length_km,
            kind: ChartKind::Bar,
        }
    }

    pub fn with_limit(mut self, limit: CategoryLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Turn grouped count rows into a ranked chart series.
///
/// `rows` should only carry rows of features that were successfully
/// queried; every row takes part in ranking, while datasets are emitted for
/// `features` only, in their given order.
pub fn build_chart(
    rows: &[RawCountRow],
    features: &[FeatureDefinition],
    options: &ChartOptions,
) -> Result<ChartSeries, AggregationError> {
    let records = ingest(rows);
    let derived = derive(&records, options.metric, options.unit_length_km)?;
    let ranked = rank(&derived, options.limit);
    Ok(build(&ranked.set, &ranked.buckets, features).for_kind(options.kind))
}

/// Summarize each of `scenarios`, in the given order.
pub fn build_statistics(
    scenarios: &[Scenario],
    features: &[FeatureDefinition],
    counts_by_field: &BTreeMap<String, u64>,
    total_network_count: u64,
    unit_length_km: f64,
) -> Result<Vec<ScenarioStatistic>, AggregationError> {
    scenarios
        .iter()
        .map(|&scenario| {
            summarize_scenario(
                scenario,
                features,
                counts_by_field,
                total_network_count,
                unit_length_km,
            )
        })
        .collect()
}
