use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::traits::MetricsSink;
use crate::types::VoteTags;

/// In-memory metrics sink for tests and local reports.
///
/// Clones share the same counters, so a test can keep a handle while the
/// election owns another.
#[derive(Clone, Default)]
pub struct MockMetrics {
    pub votes: Arc<DashMap<VoteTags, u64>>,
    pub latencies: Arc<Mutex<Vec<Duration>>>,
}

impl MockMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of every `votes.total` increment.
    pub fn total_votes(&self) -> u64 {
        self.votes.iter().map(|entry| *entry.value()).sum()
    }

    /// Increments recorded for one tag set.
    pub fn votes_for(&self, tags: &VoteTags) -> u64 {
        self.votes.get(tags).map(|n| *n).unwrap_or(0)
    }

    pub fn latency_count(&self) -> usize {
        self.latencies.lock().len()
    }

    pub fn get_latencies(&self) -> Vec<Duration> {
        self.latencies.lock().clone()
    }
}

impl MetricsSink for MockMetrics {
    fn name(&self) -> &'static str {
        "mock-metrics"
    }

    fn vote_committed(&self, tags: &VoteTags) {
        *self.votes.entry(tags.clone()).or_insert(0) += 1;
    }

    fn decision_latency(&self, latency: Duration) {
        self.latencies.lock().push(latency);
    }
}
