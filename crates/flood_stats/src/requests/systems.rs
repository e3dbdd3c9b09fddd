//! Bevy systems and plugin applying fetched results with last-result-wins.

use bevy::prelude::*;

use crate::config::DashboardConfig;
use crate::pipeline::{build_chart, build_statistics};

use super::state::{
    ChartRowsFetched, LastAggregationError, LatestChart, LatestStatistics, StatisticsFetched,
};
use super::tracker::RequestTracker;

/// Runs the chart pipeline for fetches whose ticket is still current.
///
/// Stale fetches are dropped before any computation, so a superseded
/// request can never overwrite the displayed chart.
pub fn apply_fetched_charts(
    mut fetched: EventReader<ChartRowsFetched>,
    tracker: Res<RequestTracker>,
    mut latest: ResMut<LatestChart>,
    mut last_error: ResMut<LastAggregationError>,
) {
    for event in fetched.read() {
        if !tracker.is_current(&event.ticket) {
            debug!(
                "Dropping stale chart result (generation {}, current {})",
                event.ticket.generation,
                tracker.generation(event.ticket.channel)
            );
            continue;
        }
        match build_chart(&event.rows, &event.features, &event.options) {
            Ok(series) => {
                latest.ticket = Some(event.ticket);
                latest.series = Some(series);
                last_error.clear_for(&event.ticket);
            }
            Err(e) => {
                error!("Failed to generate chart: {}", e);
                last_error.record(event.ticket, e);
            }
        }
    }
}

/// Runs the statistics pipeline for fetches whose ticket is still current.
pub fn apply_fetched_statistics(
    mut fetched: EventReader<StatisticsFetched>,
    tracker: Res<RequestTracker>,
    config: Res<DashboardConfig>,
    mut latest: ResMut<LatestStatistics>,
    mut last_error: ResMut<LastAggregationError>,
) {
    for event in fetched.read() {
        if !tracker.is_current(&event.ticket) {
            debug!(
                "Dropping stale statistics result (generation {}, current {})",
                event.ticket.generation,
                tracker.generation(event.ticket.channel)
            );
            continue;
        }
        match build_statistics(
            &event.scenarios,
            &config.features,
            &event.counts_by_field,
            event.total_network_count,
            config.unit_length_km,
        ) {
            Ok(scenarios) => {
                latest.ticket = Some(event.ticket);
                latest.scenarios = scenarios;
                last_error.clear_for(&event.ticket);
            }
            Err(e) => {
                error!("Failed to generate statistics: {}", e);
                last_error.record(event.ticket, e);
            }
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct FloodStatsPlugin;

impl Plugin for FloodStatsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DashboardConfig>()
            .init_resource::<RequestTracker>()
            .init_resource::<LatestChart>()
            .init_resource::<LatestStatistics>()
            .init_resource::<LastAggregationError>()
            .add_event::<ChartRowsFetched>()
            .add_event::<StatisticsFetched>()
            .add_systems(Update, (apply_fetched_charts, apply_fetched_statistics));
    }
}
