//! Fetch-completion events and the resources holding the latest results.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::config::{FeatureDefinition, Scenario};
use crate::error::AggregationError;
use crate::ingest::RawCountRow;
use crate::pipeline::ChartOptions;
use crate::series::ChartSeries;
use crate::summary::ScenarioStatistic;

use super::tracker::{RequestChannel, RequestTicket, RequestTracker};

/// Grouped rows for a chart request have arrived from the query service.
#[derive(Event, Debug, Clone)]
pub struct ChartRowsFetched {
    pub ticket: RequestTicket,
    pub rows: Vec<RawCountRow>,
    /// Selected series, in display order.
    pub features: Vec<FeatureDefinition>,
    pub options: ChartOptions,
}

/// Per-field counts for a statistics request have arrived.
#[derive(Event, Debug, Clone)]
pub struct StatisticsFetched {
    pub ticket: RequestTicket,
    pub counts_by_field: BTreeMap<String, u64>,
    pub total_network_count: u64,
    pub scenarios: Vec<Scenario>,
}

/// Chart series of the newest completed chart request.
#[derive(Resource, Debug, Default, Clone)]
pub struct LatestChart {
    pub ticket: Option<RequestTicket>,
    pub series: Option<ChartSeries>,
}

impl LatestChart {
    /// True when no newer chart request has been issued since this result.
    pub fn is_current(&self, tracker: &RequestTracker) -> bool {
        self.ticket.is_some_and(|t| tracker.is_current(&t))
    }
}

/// Scenario statistics of the newest completed statistics request.
#[derive(Resource, Debug, Default, Clone)]
pub struct LatestStatistics {
    pub ticket: Option<RequestTicket>,
    pub scenarios: Vec<ScenarioStatistic>,
}

impl LatestStatistics {
    pub fn is_current(&self, tracker: &RequestTracker) -> bool {
        self.ticket.is_some_and(|t| tracker.is_current(&t))
    }
}

/// A pipeline failure and the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedError {
    pub ticket: RequestTicket,
    pub error: AggregationError,
}

/// Most recent pipeline failure per channel, for each panel to surface.
#[derive(Resource, Debug, Default, Clone)]
pub struct LastAggregationError {
    pub chart: Option<RecordedError>,
    pub statistics: Option<RecordedError>,
}

impl LastAggregationError {
    fn slot_mut(&mut self, channel: RequestChannel) -> &mut Option<RecordedError> {
        match channel {
            RequestChannel::Chart => &mut self.chart,
            RequestChannel::Statistics => &mut self.statistics,
        }
    }

    pub fn get(&self, channel: RequestChannel) -> Option<&RecordedError> {
        match channel {
            RequestChannel::Chart => self.chart.as_ref(),
            RequestChannel::Statistics => self.statistics.as_ref(),
        }
    }

    /// Replaces the recorded failure of the ticket's channel only.
    pub fn record(&mut self, ticket: RequestTicket, error: AggregationError) {
        *self.slot_mut(ticket.channel) = Some(RecordedError { ticket, error });
    }

    /// Clear a recorded error once its channel produces a result.
    pub fn clear_for(&mut self, ticket: &RequestTicket) {
        *self.slot_mut(ticket.channel) = None;
    }
}
