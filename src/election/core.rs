//! Election service: one long-lived instance owns all round and vote state.

use tracing::{debug, info};

use crate::catalog::PartyCatalogVariant;
use crate::config::BaseConfig;
use crate::decision::{RandomSource, VoteDecisionEngine};
use crate::error::{Rejection, VotingError};
use crate::ledger::VoteLedger;
use crate::lifecycle::RoundLifecycle;
use crate::metrics::{MetricsSinkVariant, NoopMetrics};
use crate::stats::StatisticsReporter;
use crate::traits::{MetricsSink, PartyCatalog};
use crate::types::{
    normalize_party_code, BallotReceipt, Category, Decision, Round, RoundSummary, VoteRecord,
    VoteRequest, VoteTags,
};
use crate::voter_id;

/// Main election service. Construct once and share behind an `Arc`.
pub struct Election {
    /// Global/base configuration.
    pub config: BaseConfig,

    /// Registered parties and forecasts.
    pub catalog: PartyCatalogVariant,

    /// Receiver of vote counters and latency observations.
    pub metrics: MetricsSinkVariant,

    lifecycle: RoundLifecycle,
    ledger: VoteLedger,
}

impl Election {
    pub fn new(config: BaseConfig, catalog: PartyCatalogVariant, metrics: MetricsSinkVariant) -> Self {
        info!(
            "Election initialized (catalog={}, metrics={})",
            catalog.name(),
            metrics.name()
        );
        Self {
            config,
            catalog,
            metrics,
            lifecycle: RoundLifecycle::new(),
            ledger: VoteLedger::new(),
        }
    }

    /// Election with the seeded party catalog and no metrics.
    pub fn initialize(config: BaseConfig) -> Self {
        Self::new(
            config,
            PartyCatalogVariant::seeded(),
            MetricsSinkVariant::Noop(NoopMetrics),
        )
    }

    pub fn start_round(
        &self,
        year: u32,
        categories: &[Category],
        expected_voters: u32,
    ) -> Result<Round, VotingError> {
        self.lifecycle.start_round(year, categories, expected_voters)
    }

    /// Start a round from the configured year, categories and expected voters.
    pub fn start_configured_round(&self) -> Result<Round, VotingError> {
        self.start_round(
            self.config.year,
            &self.config.categories,
            self.config.expected_voters,
        )
    }

    pub fn end_round(&self) -> Result<RoundSummary, VotingError> {
        self.lifecycle.end_round(&self.ledger)
    }

    pub fn can_accept(&self) -> Result<(), Rejection> {
        self.lifecycle.can_accept()
    }

    pub fn current_round(&self) -> Option<Round> {
        self.lifecycle.current()
    }

    /// Votes recorded in the current round.
    pub fn vote_count(&self) -> usize {
        self.ledger.count()
    }

    pub fn statistics(&self) -> StatisticsReporter<'_> {
        StatisticsReporter::new(&self.lifecycle, &self.ledger)
    }

    /// Check the request and run the decision engine on its normalized party
    /// codes. Nothing is recorded.
    pub fn decide(
        &self,
        request: &VoteRequest,
        rng: &mut impl RandomSource,
    ) -> Result<Decision, VotingError> {
        if request.voter_id.trim().is_empty() {
            return Err(VotingError::InvalidArgument(
                "voter id number is required".to_string(),
            ));
        }
        if self.config.require_valid_voter_ids && !voter_id::is_valid(&request.voter_id) {
            return Err(VotingError::InvalidArgument(format!(
                "voter id {} must be {} digits",
                request.voter_id,
                voter_id::VOTER_ID_LEN
            )));
        }
        if request.intentions.is_empty() {
            return Err(VotingError::InvalidArgument(
                "voting intentions are required to make a vote".to_string(),
            ));
        }
        if let Some(bad) = request
            .intentions
            .iter()
            .flat_map(|block| block.intentions.iter())
            .find(|i| !(0.0..=100.0).contains(&i.percentage))
        {
            return Err(VotingError::InvalidArgument(format!(
                "intention percentage for party {} must be between 0 and 100 (got {})",
                bad.party_code, bad.percentage
            )));
        }
        self.can_accept()?;

        let request = request.normalized();
        let forecasts = self.catalog.forecasts_for(&request.parties_considered());
        Ok(VoteDecisionEngine::decide(&request, &forecasts, rng))
    }

    /// Admit the votes of a decision.
    ///
    /// Every record is validated before any is committed; a rejection leaves
    /// no trace. Admission holds the round gate, so the round cannot be
    /// archived halfway through. A record that loses the insert race to a
    /// concurrent submission is reported as already voted; records this call
    /// did insert stay recorded.
    pub fn cast(
        &self,
        request: &VoteRequest,
        decision: &Decision,
    ) -> Result<BallotReceipt, VotingError> {
        self.metrics.decision_latency(decision.think_time);

        let gate = self.lifecycle.gate();
        let round = gate.can_accept()?;

        let records: Vec<VoteRecord> = decision
            .choices
            .iter()
            .map(|(category, party_code)| VoteRecord {
                round_id: round.id,
                voter_id: request.voter_id.clone(),
                party_code: normalize_party_code(party_code),
                category: *category,
            })
            .collect();
        if records.is_empty() {
            return Err(VotingError::InvalidArgument(
                "no party was chosen in any category".to_string(),
            ));
        }

        for record in &records {
            self.ledger.validate(&gate, &self.catalog, record)?;
        }

        let mut lost: Option<Rejection> = None;
        let mut choices = Vec::with_capacity(records.len());
        for record in records {
            let tags = VoteTags::from(&record);
            let (category, party_code) = (record.category, record.party_code.clone());
            if self.ledger.commit(record) {
                self.metrics.vote_committed(&tags);
                choices.push((category, party_code));
            } else if lost.is_none() {
                lost = Some(Rejection::AlreadyVoted {
                    voter_id: request.voter_id.clone(),
                    category,
                });
            }
        }

        if let Some(reason) = lost {
            debug!("Lost admission race: {}", reason);
            return Err(reason.into());
        }

        debug!(
            "Recorded {} vote(s) for voter {} in round {}",
            choices.len(),
            request.voter_id,
            round.id
        );
        Ok(BallotReceipt {
            round_id: round.id,
            year: round.year,
            voter_id: request.voter_id.clone(),
            think_time: decision.think_time,
            choices,
        })
    }

    /// Decide and cast in one step, without any think time.
    pub fn submit(
        &self,
        request: &VoteRequest,
        rng: &mut impl RandomSource,
    ) -> Result<BallotReceipt, VotingError> {
        let decision = self.decide(request, rng)?;
        self.cast(request, &decision)
    }
}
