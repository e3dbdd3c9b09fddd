//! Last-result-wins request handling for chart and statistics panels.
//!
//! Fetches against the feature query service are asynchronous and
//! user-triggered, so an older fetch may resolve after a newer one was
//! issued. Each request takes a [`RequestTicket`] from the
//! [`RequestTracker`]; when its rows arrive as an event, the systems here run
//! the pipeline only if the ticket is still the newest for its channel and
//! publish the result to [`LatestChart`] / [`LatestStatistics`].
//!
//! Chart and statistics channels are independent.

mod state;
mod systems;
mod tracker;


pub use state::{
    ChartRowsFetched, LastAggregationError, LatestChart, LatestStatistics, RecordedError,
    StatisticsFetched,
};
pub use systems::{apply_fetched_charts, apply_fetched_statistics, FloodStatsPlugin};
pub use tracker::{RequestChannel, RequestTicket, RequestTracker};
