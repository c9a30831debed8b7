//! Async simulation orchestration with tokio::spawn - calls the election core.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use kanal::{bounded_async, AsyncReceiver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, span, warn, Instrument, Level};

use super::core::Election;
use crate::decision::{RandomSource, RngSource};
use crate::error::VotingError;
use crate::traits::metrics_sink::{VOTES_DURATION, VOTES_TOTAL};
use crate::traits::{MetricEvent, VoterSource};
use crate::types::{BallotReceipt, Category, RoundSummary, RoundTally, VoteRequest};
use crate::voters::VoterSourceVariant;

/// Outcome of one simulated round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub summary: RoundSummary,
    pub tally: Option<RoundTally>,
    pub accepted: u64,
    pub rejected: u64,
    pub failed: u64,
}

/// Aggregate of the events received on a metrics channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub votes_total: u64,
    pub votes_by_party: BTreeMap<Category, BTreeMap<String, u64>>,
    pub latency_count: u64,
    pub latency_mean_ms: f64,
    pub latency_max_ms: u64,
}

impl MetricsSummary {
    pub fn record(&mut self, event: &MetricEvent) {
        match event {
            MetricEvent::VoteCommitted(tags) => {
                self.votes_total += 1;
                *self
                    .votes_by_party
                    .entry(tags.category)
                    .or_default()
                    .entry(tags.party_code.clone())
                    .or_default() += 1;
            }
            MetricEvent::DecisionLatency(latency) => {
                let ms = latency.as_millis() as u64;
                self.latency_count += 1;
                self.latency_mean_ms +=
                    (ms as f64 - self.latency_mean_ms) / self.latency_count as f64;
                self.latency_max_ms = self.latency_max_ms.max(ms);
            }
        }
    }
}

#[derive(Default)]
struct RunCounters {
    accepted: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
}

impl Election {
    /// Run one round: open it from the configuration, feed every request from
    /// `source` through the submission workers, then close and archive it.
    ///
    /// Fails without touching it if a round is already in progress. A round
    /// opened here is always ended, even when the source cannot be opened.
    pub async fn run(self: Arc<Self>, mut source: VoterSourceVariant) -> Result<RunReport> {
        let workers = self.config.workers.max(1);
        info!(
            "Starting simulation (source={}, workers={}, think_time={})",
            source.name(),
            workers,
            self.config.think_time
        );

        if let Some(current) = self.current_round() {
            bail!(
                "voting round {} is already in progress; end it before running a simulation",
                current.id
            );
        }
        let round = self.start_configured_round()?;

        let (request_tx, request_rx) = bounded_async::<VoteRequest>(workers * 4);
        if let Err(e) = source.open(request_tx).await {
            error!("Voter source {} failed to open: {}", source.name(), e);
            self.end_round()?;
            return Err(e);
        }

        let counters = Arc::new(RunCounters::default());
        let think_time_scale = self
            .config
            .think_time
            .then_some(self.config.think_time_scale);

        // === Submission workers: decide, think, cast ===
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let election = Arc::clone(&self);
            let counters = Arc::clone(&counters);
            let rx = request_rx.clone();
            let mut rng = RngSource(match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
                None => StdRng::from_os_rng(),
            });

            let span = span!(Level::INFO, "submission_worker", worker);
            handles.push(tokio::spawn(
                async move {
                    debug!("Submission worker started");
                    while let Ok(request) = rx.recv().await {
                        match election
                            .process_request_once(&request, &mut rng, think_time_scale)
                            .await
                        {
                            Ok(_) => {
                                counters.accepted.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(VotingError::Rejected(reason)) => {
                                debug!("Vote by {} rejected: {}", request.voter_id, reason);
                                counters.rejected.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(e) => {
                                warn!("Vote by {} failed: {}", request.voter_id, e);
                                counters.failed.fetch_add(1, Ordering::Relaxed);
                            }
                        }
                    }
                    debug!("Submission worker finished (channel closed)");
                }
                .instrument(span),
            ));
        }
        drop(request_rx);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Submission worker panicked: {}", e);
            }
        }
        source.close().await?;

        let summary = self.end_round()?;
        let tally = self.statistics().tally(round.id);

        let report = RunReport {
            summary,
            tally,
            accepted: counters.accepted.load(Ordering::Relaxed),
            rejected: counters.rejected.load(Ordering::Relaxed),
            failed: counters.failed.load(Ordering::Relaxed),
        };
        info!(
            "Simulation finished: round {} recorded {} votes ({} accepted, {} rejected, {} failed submissions)",
            report.summary.round_id,
            report.summary.votes,
            report.accepted,
            report.rejected,
            report.failed
        );
        Ok(report)
    }

    /// Handle one request end to end. Think time, when enabled, is slept
    /// between deciding and casting and never while holding round state.
    pub async fn process_request_once(
        &self,
        request: &VoteRequest,
        rng: &mut impl RandomSource,
        think_time_scale: Option<f64>,
    ) -> Result<BallotReceipt, VotingError> {
        let decision = self.decide(request, rng)?;

        if let Some(scale) = think_time_scale {
            let pause = decision.think_time.mul_f64(scale.max(0.0));
            if pause > Duration::ZERO {
                tokio::time::sleep(pause).await;
            }
        }

        self.cast(request, &decision)
    }
}

/// Consume metric events until every sender is gone.
pub async fn collect_metrics(rx: AsyncReceiver<MetricEvent>) -> MetricsSummary {
    let mut summary = MetricsSummary::default();
    while let Ok(event) = rx.recv().await {
        summary.record(&event);
    }
    debug!(
        "Metrics collector finished (channel closed): {}={}, {} samples={}",
        VOTES_TOTAL, summary.votes_total, VOTES_DURATION, summary.latency_count
    );
    summary
}
