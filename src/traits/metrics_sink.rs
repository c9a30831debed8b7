use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::types::VoteTags;

/// Counter name for committed votes.
pub const VOTES_TOTAL: &str = "votes.total";
/// Histogram name for decision latency, in milliseconds.
pub const VOTES_DURATION: &str = "votes.duration";

/// A single observation emitted by the election core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetricEvent {
    /// One increment of `votes.total`.
    VoteCommitted(VoteTags),
    /// One `votes.duration` observation.
    DecisionLatency(Duration),
}

/// Receiver of election metrics (Prometheus exporter, OTLP bridge, test probe, ...).
///
/// Called from inside the admission path, so implementations must not block.
pub trait MetricsSink: Send + Sync {
    /// Sink name for logging.
    fn name(&self) -> &'static str;

    /// Called exactly once per committed vote.
    fn vote_committed(&self, tags: &VoteTags);

    /// Called once per submission with the simulated decision latency.
    fn decision_latency(&self, latency: Duration);
}
