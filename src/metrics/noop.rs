use std::time::Duration;

use crate::traits::MetricsSink;
use crate::types::VoteTags;

/// Metrics sink that drops every observation.
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn name(&self) -> &'static str {
        "noop-metrics"
    }

    fn vote_committed(&self, _tags: &VoteTags) {}

    fn decision_latency(&self, _latency: Duration) {}
}
