//! Read-only projections over round state. Nothing here mutates or fails.

use serde::{Deserialize, Serialize};

use crate::ledger::VoteLedger;
use crate::lifecycle::RoundLifecycle;
use crate::types::{RoundId, RoundSummary, RoundTally, VotingStatus};

pub const VOTING_OPEN: &str = "voting is open";

/// Statistics for the current round, if one is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurrentRound {
    Open(RoundSummary),
    NotOpen { reason: String },
}

pub struct StatisticsReporter<'a> {
    lifecycle: &'a RoundLifecycle,
    ledger: &'a VoteLedger,
}

impl<'a> StatisticsReporter<'a> {
    pub fn new(lifecycle: &'a RoundLifecycle, ledger: &'a VoteLedger) -> Self {
        Self { lifecycle, ledger }
    }

    pub fn status(&self) -> VotingStatus {
        match self.lifecycle.can_accept() {
            Ok(()) => VotingStatus {
                voting_enabled: true,
                status: VOTING_OPEN.to_string(),
            },
            Err(reason) => VotingStatus {
                voting_enabled: false,
                status: reason.to_string(),
            },
        }
    }

    /// Snapshot of the open round with its live vote count.
    pub fn current(&self) -> CurrentRound {
        // Holding the gate keeps the count attributed to the right round
        let gate = self.lifecycle.gate();
        match gate.can_accept() {
            Ok(round) => CurrentRound::Open(RoundSummary::of(round, self.ledger.count() as u64)),
            Err(reason) => CurrentRound::NotOpen {
                reason: reason.to_string(),
            },
        }
    }

    pub fn archive(&self) -> Vec<RoundSummary> {
        self.lifecycle.archive()
    }

    /// Per-party counts for an archived round or the current one.
    pub fn tally(&self, round_id: RoundId) -> Option<RoundTally> {
        let gate = self.lifecycle.gate();
        if gate.current().is_some_and(|round| round.id == round_id) {
            return Some(self.ledger.tally(round_id));
        }
        gate.archive()
            .iter()
            .find(|entry| entry.round.id == round_id)
            .map(|entry| RoundTally::from_records(round_id, &entry.votes))
    }
}
