//! Category aggregation, ranking and scenario statistics for road segments
//! affected by flood scenarios.
//!
//! The engine turns grouped "segments per category, per feature" counts into
//! chart series and scenario summaries. Data flows strictly forward:
//!
//! 1. [`ingest`] normalizes raw query rows, mapping blank categories to
//!    `"Unknown"`.
//! 2. [`metric`] converts counts into the selected display metric.
//! 3. [`ranking`] merges features per category, ranks, and folds overflow
//!    into `"Other"`.
//! 4. [`series`] aligns per-feature values to the ranked labels.
//! 5. [`summary`] computes per-scenario totals, breakdowns and risk levels.
//!
//! Every step is a pure function of its arguments. [`requests`] wires the
//! pipeline into a Bevy app with last-result-wins semantics for
//! asynchronously fetched inputs.

pub mod config;
pub mod error;
pub mod ingest;
pub mod metric;
pub mod pipeline;
pub mod ranking;
pub mod requests;
pub mod series;
pub mod summary;

#[cfg(test)]
mod proptests;

pub use config::{DashboardConfig, FeatureDefinition, Scenario};
pub use error::{AggregationError, ConfigError};
pub use ingest::{ingest, Category, RawCountRecord, RawCountRow};
pub use metric::{derive, DerivedRecord, Metric};
pub use pipeline::{build_chart, build_statistics, ChartOptions};
pub use ranking::{rank, CategoryBucket, CategoryLimit, RankedCategories, RankedCategorySet};
pub use requests::FloodStatsPlugin;
pub use series::{build, ChartKind, ChartSeries, Dataset};
pub use summary::{summarize, summarize_scenario, RiskBands, ScenarioStatistic};
