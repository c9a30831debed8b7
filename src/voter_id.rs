//! Synthetic thirteen-digit voter identity numbers.

use rand::Rng;

pub const VOTER_ID_LEN: usize = 13;

/// Generate an id shaped as YYMMDD SSSS C A Z, where Z is a checksum digit.
pub fn generate(rng: &mut impl Rng) -> String {
    let year: u32 = rng.random_range(0..100);
    let month: u32 = rng.random_range(1..=12);
    let day: u32 = rng.random_range(1..=28);
    let sequence: u32 = rng.random_range(0..10_000);
    let citizen: u32 = rng.random_range(0..=1);
    let race_digit: u32 = rng.random_range(0..8);
    let checksum = (year ^ month ^ day ^ sequence ^ citizen ^ race_digit) % 10;

    format!("{year:02}{month:02}{day:02}{sequence:04}{citizen}{race_digit}{checksum}")
}

/// Exactly thirteen ASCII digits.
pub fn is_valid(voter_id: &str) -> bool {
    voter_id.len() == VOTER_ID_LEN && voter_id.bytes().all(|b| b.is_ascii_digit())
}
