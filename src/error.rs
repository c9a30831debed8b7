use thiserror::Error;

use crate::types::Category;

/// Business-rule rejection of a single vote. Never fatal; the message is
/// surfaced to the submitter verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no voting round is currently in progress")]
    NoRoundInProgress,

    /// A current round that is not open. `end_round` closes and clears the
    /// round under one write guard, so admissions never observe it today;
    /// they see `NoRoundInProgress` instead.
    #[error("the current voting round is closed")]
    RoundClosed,

    #[error("category {0} is not applicable to the current voting round")]
    CategoryNotApplicable(Category),

    #[error("voter {voter_id} has already voted in the {category} category")]
    AlreadyVoted { voter_id: String, category: Category },

    #[error("party {0} is not registered")]
    PartyNotRegistered(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotingError {
    /// Malformed administrative or request input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not legal in the current lifecycle state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("vote rejected: {0}")]
    Rejected(#[from] Rejection),
}

impl VotingError {
    /// The rejection behind this error, if it is a business-rule rejection.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            VotingError::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}
