use std::time::Duration;

use kanal::Sender;

use crate::traits::metrics_sink::MetricEvent;
use crate::traits::MetricsSink;
use crate::types::VoteTags;

/// Metrics sink that publishes events to a kanal channel.
///
/// Use an unbounded channel: the sink is called from the admission path and
/// must never wait on the consumer.
pub struct ChannelMetrics {
    sender: Sender<MetricEvent>,
}

impl ChannelMetrics {
    pub fn new(sender: Sender<MetricEvent>) -> Self {
        Self { sender }
    }

    fn publish(&self, event: MetricEvent) {
        if let Err(e) = self.sender.send(event) {
            tracing::debug!("Metrics channel closed, dropping event: {}", e);
        }
    }
}

impl MetricsSink for ChannelMetrics {
    fn name(&self) -> &'static str {
        "channel-metrics"
    }

    fn vote_committed(&self, tags: &VoteTags) {
        self.publish(MetricEvent::VoteCommitted(tags.clone()));
    }

    fn decision_latency(&self, latency: Duration) {
        self.publish(MetricEvent::DecisionLatency(latency));
    }
}
