//! Scenario summaries for the statistics panel.
//!
//! - **Total affected**: count, length and percentage of network taken from
//!   the scenario's "any flood model" union indicator.
//! - **Model breakdown**: the same figures per flood model, omitting models
//!   with no affected segments.
//! - **Risk classification**: a pure lookup of a percentage against
//!   configurable ascending bands.
//!
//! Every percentage is `0` when the network total is `0`.

mod risk;
mod stats;


pub use risk::{RiskBand, RiskBands};
pub use stats::{
    percentage_of, summarize, summarize_scenario, AffectedTotals, ModelBreakdown, ModelCount,
    ScenarioStatistic,
};
