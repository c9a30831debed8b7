use std::time::Duration;

use kanal::Sender;

use super::{channel::ChannelMetrics, mock::MockMetrics, noop::NoopMetrics};
use crate::traits::metrics_sink::MetricEvent;
use crate::traits::MetricsSink;
use crate::types::VoteTags;

/// Enum representing all possible metrics sink implementations.
pub enum MetricsSinkVariant {
    Noop(NoopMetrics),
    Mock(MockMetrics),
    Channel(ChannelMetrics),
}

impl MetricsSinkVariant {
    pub fn new_channel(sender: Sender<MetricEvent>) -> Self {
        MetricsSinkVariant::Channel(ChannelMetrics::new(sender))
    }
}

impl MetricsSink for MetricsSinkVariant {
    fn name(&self) -> &'static str {
        match self {
            MetricsSinkVariant::Noop(inner) => inner.name(),
            MetricsSinkVariant::Mock(inner) => inner.name(),
            MetricsSinkVariant::Channel(inner) => inner.name(),
        }
    }

    fn vote_committed(&self, tags: &VoteTags) {
        match self {
            MetricsSinkVariant::Noop(inner) => inner.vote_committed(tags),
            MetricsSinkVariant::Mock(inner) => inner.vote_committed(tags),
            MetricsSinkVariant::Channel(inner) => inner.vote_committed(tags),
        }
    }

    fn decision_latency(&self, latency: Duration) {
        match self {
            MetricsSinkVariant::Noop(inner) => inner.decision_latency(latency),
            MetricsSinkVariant::Mock(inner) => inner.decision_latency(latency),
            MetricsSinkVariant::Channel(inner) => inner.decision_latency(latency),
        }
    }
}
