//! Concurrent store of the votes accepted for the open round.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::Rejection;
use crate::lifecycle::RoundGate;
use crate::traits::PartyCatalog;
use crate::types::{Category, RoundId, RoundTally, VoteKey, VoteRecord};

/// Votes keyed by (voter, category). Sharded, so unrelated voters never
/// contend on a single lock.
#[derive(Debug, Default)]
pub struct VoteLedger {
    votes: DashMap<VoteKey, (u64, VoteRecord)>,
    sequence: AtomicU64,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a record against the round held by `gate` and the catalog.
    /// Has no side effects.
    pub fn validate(
        &self,
        gate: &RoundGate<'_>,
        catalog: &impl PartyCatalog,
        record: &VoteRecord,
    ) -> Result<(), Rejection> {
        let round = gate.can_accept()?;

        if !round.accepts(record.category) {
            return Err(Rejection::CategoryNotApplicable(record.category));
        }
        if self.contains(&record.voter_id, record.category) {
            return Err(Rejection::AlreadyVoted {
                voter_id: record.voter_id.clone(),
                category: record.category,
            });
        }
        if !catalog.is_registered(&record.party_code) {
            return Err(Rejection::PartyNotRegistered(record.party_code.clone()));
        }

        Ok(())
    }

    /// Insert the record unless its key is taken. Returns `false`, leaving the
    /// existing vote untouched, when another record got there first.
    pub fn commit(&self, record: VoteRecord) -> bool {
        match self.votes.entry(record.key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
                slot.insert((seq, record));
                true
            }
        }
    }

    pub fn count(&self) -> usize {
        self.votes.len()
    }

    pub fn contains(&self, voter_id: &str, category: Category) -> bool {
        self.votes.contains_key(&VoteKey {
            voter_id: voter_id.to_string(),
            category,
        })
    }

    pub fn tally(&self, round_id: RoundId) -> RoundTally {
        let records: Vec<VoteRecord> = self
            .votes
            .iter()
            .map(|entry| entry.value().1.clone())
            .collect();
        RoundTally::from_records(round_id, &records)
    }

    /// Remove every vote, returned in commit order. Callers must hold the
    /// round write lock so no commit races the drain.
    pub(crate) fn drain(&self) -> Vec<VoteRecord> {
        let mut entries: Vec<(u64, VoteRecord)> = self
            .votes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        self.votes.clear();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, record)| record).collect()
    }
}
