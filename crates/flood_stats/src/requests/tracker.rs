//! `RequestTracker` resource: per-channel request generations.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Independent request stream. A newer request on one channel never
/// invalidates the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestChannel {
    Chart,
    Statistics,
}

/// Identifies one issued request; only the newest ticket of a channel is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub channel: RequestChannel,
    pub generation: u64,
}

/// Tracks the newest request generation per channel.
#[derive(Resource, Debug, Default, Clone)]
pub struct RequestTracker {
    chart_generation: u64,
    statistics_generation: u64,
}

impl RequestTracker {
    fn generation_mut(&mut self, channel: RequestChannel) -> &mut u64 {
        match channel {
            RequestChannel::Chart => &mut self.chart_generation,
            RequestChannel::Statistics => &mut self.statistics_generation,
        }
    }

    pub fn generation(&self, channel: RequestChannel) -> u64 {
        match channel {
            RequestChannel::Chart => self.chart_generation,
            RequestChannel::Statistics => self.statistics_generation,
        }
    }

    /// Start a new request on `channel`, superseding any in flight.
    pub fn issue(&mut self, channel: RequestChannel) -> RequestTicket {
        let generation = self.generation_mut(channel);
        *generation += 1;
        RequestTicket {
            channel,
            generation: *generation,
        }
    }

    /// Supersede in-flight requests without starting a new one
    /// (e.g. a filter change).
    pub fn invalidate(&mut self, channel: RequestChannel) {
        *self.generation_mut(channel) += 1;
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation != 0 && self.generation(ticket.channel) == ticket.generation
    }
}
