use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::traits::VoterSource;
use crate::types::{Category, CategoryIntentions, VoteIntention, VoteRequest};
use crate::voter_id;

/// Generates random voters, each leaning towards a few parties per category.
///
/// A share of the requests reuses an earlier voter id, which the election
/// must reject as a repeat vote.
pub struct SyntheticVoters {
    pub count: usize,
    pub categories: Vec<Category>,
    pub party_codes: Vec<String>,
    pub max_parties: usize,
    pub repeat_ratio: f64,
    pub seed: Option<u64>,
}

impl SyntheticVoters {
    pub fn new(count: usize, categories: Vec<Category>, party_codes: Vec<String>) -> Self {
        Self {
            count,
            categories,
            party_codes,
            max_parties: 4,
            repeat_ratio: 0.0,
            seed: None,
        }
    }

    pub fn with_max_parties(mut self, max_parties: usize) -> Self {
        self.max_parties = max_parties;
        self
    }

    pub fn with_repeat_ratio(mut self, repeat_ratio: f64) -> Self {
        self.repeat_ratio = repeat_ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Split 100 into `n` positive integer shares.
fn split_percentages(rng: &mut impl Rng, n: usize) -> Vec<f64> {
    let mut shares = Vec::with_capacity(n);
    let mut remaining = 100u32;
    for i in 0..n.saturating_sub(1) {
        let reserve = (n - i - 1) as u32;
        let share = rng.random_range(1..=remaining.saturating_sub(reserve).max(1));
        shares.push(share as f64);
        remaining -= share;
    }
    shares.push(remaining as f64);
    shares
}

/// Build one request; `voter_id` decides whether this is a fresh or repeat voter.
pub fn random_request(
    rng: &mut impl Rng,
    voter_id: String,
    categories: &[Category],
    party_codes: &[String],
    max_parties: usize,
) -> VoteRequest {
    let upper = max_parties.clamp(1, party_codes.len().max(1));
    let intentions = categories
        .iter()
        .map(|category| {
            let k = rng.random_range(1..=upper).min(party_codes.len());
            let picked: Vec<&String> = party_codes.choose_multiple(rng, k).collect();
            let shares = split_percentages(rng, picked.len());
            CategoryIntentions {
                category: *category,
                intentions: picked
                    .into_iter()
                    .zip(shares)
                    .map(|(code, percentage)| VoteIntention {
                        party_code: code.clone(),
                        percentage,
                    })
                    .collect(),
            }
        })
        .collect();

    VoteRequest {
        voter_id,
        intentions,
    }
}

#[async_trait]
impl VoterSource for SyntheticVoters {
    fn name(&self) -> &'static str {
        "synthetic-voters"
    }

    async fn open(&mut self, tx: AsyncSender<VoteRequest>) -> Result<()> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let count = self.count;
        let categories = self.categories.clone();
        let party_codes = self.party_codes.clone();
        let max_parties = self.max_parties;
        let repeat_ratio = self.repeat_ratio;

        info!(
            "Synthetic voters: generating {} requests (repeat_ratio={})",
            count, repeat_ratio
        );

        tokio::spawn(async move {
            let mut seen: Vec<String> = Vec::with_capacity(count);
            for _ in 0..count {
                let voter_id = if !seen.is_empty() && rng.random_bool(repeat_ratio.clamp(0.0, 1.0)) {
                    seen[rng.random_range(0..seen.len())].clone()
                } else {
                    let id = voter_id::generate(&mut rng);
                    seen.push(id.clone());
                    id
                };
                let request =
                    random_request(&mut rng, voter_id, &categories, &party_codes, max_parties);
                if tx.send(request).await.is_err() {
                    debug!("Synthetic voters: receiver closed");
                    break;
                }
            }
        });

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
