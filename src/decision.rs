//! Turns a voter's multi-party intentions into one choice per category.
//!
//! The engine is pure: all randomness comes from an injected [`RandomSource`],
//! so a fixed source gives reproducible decisions.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::types::{Category, Decision, PartyForecast, VoteRequest};

/// Upper bound (exclusive) of the per-voter scaling factor.
pub const MAX_SCALING_FACTOR: f64 = 0.1;
/// Range of the base think time per party considered, in milliseconds.
pub const THINK_BASE_MS: std::ops::Range<u32> = 1000..5000;

/// Randomness consumed by the decision engine.
pub trait RandomSource {
    /// Decisiveness trait shared by all categories of one request, in [0, 0.1).
    fn scaling_factor(&mut self) -> f64;

    /// Base think time in milliseconds, in [1000, 5000).
    fn think_base_ms(&mut self) -> u32;
}

/// Adapts any `rand` generator.
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn scaling_factor(&mut self) -> f64 {
        self.0.random::<f64>() * MAX_SCALING_FACTOR
    }

    fn think_base_ms(&mut self) -> u32 {
        self.0.random_range(THINK_BASE_MS)
    }
}

/// Always returns the same values.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource {
    pub scaling_factor: f64,
    pub think_base_ms: u32,
}

impl FixedSource {
    pub fn new(scaling_factor: f64, think_base_ms: u32) -> Self {
        Self {
            scaling_factor,
            think_base_ms,
        }
    }
}

impl RandomSource for FixedSource {
    fn scaling_factor(&mut self) -> f64 {
        self.scaling_factor
    }

    fn think_base_ms(&mut self) -> u32 {
        self.think_base_ms
    }
}

pub struct VoteDecisionEngine;

impl VoteDecisionEngine {
    /// Select one party per category and compute the simulated think time.
    ///
    /// Categories with no candidates produce no choice. If a category appears
    /// in more than one block only the first block is considered.
    pub fn decide(
        request: &VoteRequest,
        forecasts: &[PartyForecast],
        rng: &mut impl RandomSource,
    ) -> Decision {
        let scaling_factor = rng.scaling_factor();
        let mut choices: Vec<(Category, String)> = Vec::with_capacity(request.intentions.len());

        for block in &request.intentions {
            if choices.iter().any(|(c, _)| *c == block.category) {
                debug!(
                    "Ignoring repeated {} block for voter {}",
                    block.category, request.voter_id
                );
                continue;
            }

            let mut best: Option<(&str, f64)> = None;
            for intention in &block.intentions {
                let weight = forecasts
                    .iter()
                    .find(|f| f.party_code.eq_ignore_ascii_case(intention.party_code.trim()))
                    .map(|f| f.weight / 100.0)
                    .unwrap_or(1.0);
                let score = scaling_factor * intention.percentage * weight;

                match best {
                    Some((_, top)) if score <= top => {}
                    _ => best = Some((intention.party_code.as_str(), score)),
                }
            }

            if let Some((code, _)) = best {
                choices.push((block.category, code.to_string()));
            }
        }

        let parties = request.parties_considered().len() as f64;
        let base = rng.think_base_ms() as f64;
        let think_ms = (scaling_factor * base * parties).round().max(0.0) as u64;

        Decision {
            choices,
            think_time: Duration::from_millis(think_ms),
            scaling_factor,
        }
    }
}
