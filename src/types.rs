use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VotingError;

/// Round identity, assigned sequentially from 1.
pub type RoundId = u64;

/// Voting category. The display label doubles as the metrics tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    National,
    Provincial,
    Local,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::National, Category::Provincial, Category::Local];

    pub fn label(&self) -> &'static str {
        match self {
            Category::National => "National",
            Category::Provincial => "Provincial",
            Category::Local => "Local",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = VotingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VotingError::InvalidArgument(format!("unknown vote category: {s}")))
    }
}

/// A bounded voting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub year: u32,
    /// Deduplicated, first-seen order. Fixed at creation.
    pub categories: Vec<Category>,
    pub expected_voters: u32,
    pub is_open: bool,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Round {
    pub fn accepts(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

/// Admission key: one vote per voter per category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoteKey {
    pub voter_id: String,
    pub category: Category,
}

/// A vote accepted (or about to be validated) for a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub round_id: RoundId,
    pub voter_id: String,
    pub party_code: String,
    pub category: Category,
}

impl VoteRecord {
    pub fn key(&self) -> VoteKey {
        VoteKey {
            voter_id: self.voter_id.clone(),
            category: self.category,
        }
    }
}

/// Catalog reference data for a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub code: String,
    pub name: String,
}

/// Forecast weight for a party, in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyForecast {
    pub party_code: String,
    pub weight: f64,
}

/// How strongly a voter leans towards a party, in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteIntention {
    pub party_code: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryIntentions {
    pub category: Category,
    pub intentions: Vec<VoteIntention>,
}

/// Raw submission payload as supplied by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub voter_id: String,
    pub intentions: Vec<CategoryIntentions>,
}

/// Canonical form of a party code: trimmed, ASCII uppercase.
pub fn normalize_party_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl VoteRequest {
    /// Copy of the request with every party code in canonical form.
    pub fn normalized(&self) -> Self {
        Self {
            voter_id: self.voter_id.clone(),
            intentions: self
                .intentions
                .iter()
                .map(|block| CategoryIntentions {
                    category: block.category,
                    intentions: block
                        .intentions
                        .iter()
                        .map(|i| VoteIntention {
                            party_code: normalize_party_code(&i.party_code),
                            percentage: i.percentage,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Distinct party codes across every category, sorted.
    pub fn parties_considered(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .intentions
            .iter()
            .flat_map(|block| block.intentions.iter().map(|i| i.party_code.clone()))
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }
}

/// Output of the decision engine for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub choices: Vec<(Category, String)>,
    pub think_time: Duration,
    pub scaling_factor: f64,
}

/// Point-in-time snapshot of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_id: RoundId,
    pub year: u32,
    pub is_open: bool,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub expected_voters: u32,
    pub votes: u64,
    pub categories: Vec<Category>,
    /// When this snapshot was produced.
    pub taken_at: DateTime<Utc>,
}

impl RoundSummary {
    pub fn of(round: &Round, votes: u64) -> Self {
        Self {
            round_id: round.id,
            year: round.year,
            is_open: round.is_open,
            started_at: round.started_at,
            ended_at: round.ended_at,
            expected_voters: round.expected_voters,
            votes,
            categories: round.categories.clone(),
            taken_at: Utc::now(),
        }
    }
}

/// A closed round with its final votes. Immutable once archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub round: Round,
    /// Commit order.
    pub votes: Vec<VoteRecord>,
    pub summary: RoundSummary,
}

/// Votes per category per party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTally {
    pub round_id: RoundId,
    pub counts: BTreeMap<Category, BTreeMap<String, u64>>,
}

impl RoundTally {
    pub fn from_records<'a>(round_id: RoundId, records: impl IntoIterator<Item = &'a VoteRecord>) -> Self {
        let mut counts: BTreeMap<Category, BTreeMap<String, u64>> = BTreeMap::new();
        for record in records {
            *counts
                .entry(record.category)
                .or_default()
                .entry(record.party_code.clone())
                .or_default() += 1;
        }
        Self { round_id, counts }
    }

    pub fn total(&self) -> u64 {
        self.counts.values().flat_map(|parties| parties.values()).sum()
    }

    /// Party with the most votes in a category; ties go to the lexically smaller code.
    pub fn leader(&self, category: Category) -> Option<(&str, u64)> {
        self.counts.get(&category).and_then(|parties| {
            parties
                .iter()
                .fold(None, |best: Option<(&str, u64)>, (code, &n)| match best {
                    Some((_, m)) if m >= n => best,
                    _ => Some((code.as_str(), n)),
                })
        })
    }
}

/// Whether votes are currently being accepted, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingStatus {
    pub voting_enabled: bool,
    pub status: String,
}

/// Returned to a submitter whose votes were all recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallotReceipt {
    pub round_id: RoundId,
    pub year: u32,
    pub voter_id: String,
    pub think_time: Duration,
    pub choices: Vec<(Category, String)>,
}

/// Metrics dimensions of a committed vote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteTags {
    pub round_id: RoundId,
    pub party_code: String,
    pub category: Category,
}

impl From<&VoteRecord> for VoteTags {
    fn from(record: &VoteRecord) -> Self {
        Self {
            round_id: record.round_id,
            party_code: record.party_code.clone(),
            category: record.category,
        }
    }
}
