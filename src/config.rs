use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::types::Category;

/// Base configuration for the simulator.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "votesim", about = "Simulate a voting round under concurrent load")]
pub struct BaseConfig {
    /// Voting year of the simulated round (2020-2100).
    #[arg(long, env = "VOTESIM_YEAR", default_value_t = 2024)]
    pub year: u32,

    /// Categories open for voting, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "National")]
    pub categories: Vec<Category>,

    /// Expected number of voters recorded on the round.
    #[arg(long, default_value_t = 10_000)]
    pub expected_voters: u32,

    /// Number of synthetic voters to generate.
    #[arg(long, default_value_t = 1_000)]
    pub voters: usize,

    /// Concurrent submission workers.
    #[arg(long, default_value_t = 16)]
    pub workers: usize,

    /// Share of submissions that repeat an earlier voter id (0.0-1.0).
    #[arg(long, default_value_t = 0.05)]
    pub repeat_ratio: f64,

    /// Maximum number of parties a synthetic voter considers per category.
    #[arg(long, default_value_t = 4)]
    pub max_parties: usize,

    /// Sleep the simulated think time before casting.
    #[arg(long)]
    pub think_time: bool,

    /// Multiplier applied to think time when it is slept.
    #[arg(long, default_value_t = 1.0)]
    pub think_time_scale: f64,

    /// Seed for reproducible runs.
    #[arg(long, env = "VOTESIM_SEED")]
    pub seed: Option<u64>,

    /// Reject voter ids that are not thirteen digits.
    #[arg(long)]
    pub require_valid_voter_ids: bool,
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            year: 2024,
            categories: vec![Category::National],
            expected_voters: 10_000,
            voters: 1_000,
            workers: 16,
            repeat_ratio: 0.05,
            max_parties: 4,
            think_time: false,
            think_time_scale: 1.0,
            seed: None,
            require_valid_voter_ids: false,
        }
    }
}
