// Library exports for testing and external use

pub mod catalog;
pub mod config;
pub mod decision;
pub mod election;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod metrics;
pub mod stats;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod voter_id;
pub mod voters;

// Re-export commonly used types and traits
pub use config::BaseConfig;
pub use decision::{FixedSource, RandomSource, RngSource, VoteDecisionEngine};
pub use election::{Election, RunReport};
pub use error::{Rejection, VotingError};
pub use ledger::VoteLedger;
pub use lifecycle::RoundLifecycle;
pub use stats::{CurrentRound, StatisticsReporter};
pub use traits::{MetricsSink, PartyCatalog, VoterSource};
pub use types::{
    ArchiveEntry, BallotReceipt, Category, CategoryIntentions, Decision, PartyForecast, Round,
    RoundSummary, RoundTally, VoteIntention, VoteKey, VoteRecord, VoteRequest, VotingStatus,
};

// Re-export variant enums for convenience
pub use catalog::{MockCatalog, PartyCatalogVariant, SeededCatalog};
pub use metrics::{MetricsSinkVariant, MockMetrics};
pub use voters::{MockVoters, SyntheticVoters, VoterSourceVariant};
