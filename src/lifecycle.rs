//! Voting-round state machine and the append-only archive.
//!
//! All round state sits behind one `RwLock`. Vote admissions hold the read
//! side through a [`RoundGate`] for the whole validate + commit sequence;
//! `start_round` and `end_round` take the write side, so a transition never
//! interleaves with an admission.

use chrono::Utc;
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::{info, warn};

use crate::error::{Rejection, VotingError};
use crate::ledger::VoteLedger;
use crate::types::{ArchiveEntry, Category, Round, RoundId, RoundSummary};

pub const MIN_YEAR: u32 = 2020;
pub const MAX_YEAR: u32 = 2100;

#[derive(Debug)]
struct LifecycleState {
    current: Option<Round>,
    archive: Vec<ArchiveEntry>,
    next_id: RoundId,
}

/// Owner of the current round and the archive of closed rounds.
#[derive(Debug)]
pub struct RoundLifecycle {
    state: RwLock<LifecycleState>,
}

/// Shared view of round state held across an admission.
pub struct RoundGate<'a> {
    state: RwLockReadGuard<'a, LifecycleState>,
}

impl RoundGate<'_> {
    /// The open round, or the reason votes are not accepted.
    pub fn can_accept(&self) -> Result<&Round, Rejection> {
        match &self.state.current {
            None => Err(Rejection::NoRoundInProgress),
            Some(round) if !round.is_open => Err(Rejection::RoundClosed),
            Some(round) => Ok(round),
        }
    }

    pub fn current(&self) -> Option<&Round> {
        self.state.current.as_ref()
    }

    pub fn archive(&self) -> &[ArchiveEntry] {
        &self.state.archive
    }
}

impl RoundLifecycle {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LifecycleState {
                current: None,
                archive: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Open a new round.
    ///
    /// While a round is current this returns that round unchanged without
    /// looking at the arguments, so administrators can retry safely.
    pub fn start_round(
        &self,
        year: u32,
        categories: &[Category],
        expected_voters: u32,
    ) -> Result<Round, VotingError> {
        let mut state = self.state.write();

        if let Some(current) = &state.current {
            warn!(
                "A voting round is already in progress (round_id={}). End it before starting a new one",
                current.id
            );
            return Ok(current.clone());
        }

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(VotingError::InvalidArgument(format!(
                "the year must be between {MIN_YEAR} and {MAX_YEAR} (got {year})"
            )));
        }
        if let Some(latest) = state.archive.iter().map(|e| e.round.year).max() {
            if year <= latest {
                return Err(VotingError::InvalidArgument(format!(
                    "the year must be greater than the previous round's year ({latest})"
                )));
            }
        }
        if expected_voters < 1 {
            return Err(VotingError::InvalidArgument(
                "the number of expected voters must be at least 1".to_string(),
            ));
        }
        if categories.is_empty() {
            return Err(VotingError::InvalidArgument(
                "at least one category must be provided".to_string(),
            ));
        }

        let mut distinct: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if !distinct.contains(category) {
                distinct.push(*category);
            }
        }

        let round = Round {
            id: state.next_id,
            year,
            categories: distinct,
            expected_voters,
            is_open: true,
            started_at: Utc::now(),
            ended_at: None,
        };
        state.next_id += 1;
        state.current = Some(round.clone());

        info!(
            "Voting round {} opened (year={}, categories={:?}, expected_voters={})",
            round.id, round.year, round.categories, round.expected_voters
        );
        Ok(round)
    }

    /// Close the current round, move it and its votes into the archive and
    /// clear the ledger, all under one write guard.
    pub fn end_round(&self, ledger: &VoteLedger) -> Result<RoundSummary, VotingError> {
        let mut state = self.state.write();

        let mut round = state.current.take().ok_or_else(|| {
            VotingError::InvalidState(Rejection::NoRoundInProgress.to_string())
        })?;
        round.is_open = false;
        round.ended_at = Some(Utc::now());

        let votes = ledger.drain();
        let summary = RoundSummary::of(&round, votes.len() as u64);

        info!(
            "Voting round {} closed with {} votes (expected {})",
            round.id, summary.votes, round.expected_voters
        );

        state.archive.push(ArchiveEntry {
            round,
            votes,
            summary: summary.clone(),
        });

        Ok(summary)
    }

    /// Whether votes are being accepted right now.
    pub fn can_accept(&self) -> Result<(), Rejection> {
        self.gate().can_accept().map(|_| ())
    }

    pub fn gate(&self) -> RoundGate<'_> {
        RoundGate {
            state: self.state.read(),
        }
    }

    pub fn current(&self) -> Option<Round> {
        self.state.read().current.clone()
    }

    /// Summaries of every closed round, oldest first.
    pub fn archive(&self) -> Vec<RoundSummary> {
        self.state
            .read()
            .archive
            .iter()
            .map(|entry| entry.summary.clone())
            .collect()
    }

    pub fn archived(&self, round_id: RoundId) -> Option<ArchiveEntry> {
        self.state
            .read()
            .archive
            .iter()
            .find(|entry| entry.round.id == round_id)
            .cloned()
    }

    pub fn archive_len(&self) -> usize {
        self.state.read().archive.len()
    }
}

impl Default for RoundLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
