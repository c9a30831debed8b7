//! Unit tests for the election service.
//!
//! These exercise the synchronous admission path directly and the async
//! helpers in tasks.rs without spawning a full simulation.

use std::time::Duration;

use anyhow::Result;

use super::core::Election;
use crate::catalog::{MockCatalog, PartyCatalogVariant};
use crate::config::BaseConfig;
use crate::decision::FixedSource;
use crate::error::{Rejection, VotingError};
use crate::metrics::{MetricsSinkVariant, MockMetrics};
use crate::stats::CurrentRound;
use crate::types::{Category, CategoryIntentions, VoteIntention, VoteRequest, VoteTags};

// ==================== TEST HELPERS ====================

fn test_election() -> (Election, MockMetrics) {
    let metrics = MockMetrics::new();
    let catalog = MockCatalog::with_codes(&["X", "Y", "Z"]).with_forecast("Y", 10.0);
    let election = Election::new(
        BaseConfig::default(),
        PartyCatalogVariant::Mock(catalog),
        MetricsSinkVariant::Mock(metrics.clone()),
    );
    (election, metrics)
}

fn ballot(voter: &str, blocks: Vec<(Category, Vec<(&str, f64)>)>) -> VoteRequest {
    VoteRequest {
        voter_id: voter.to_string(),
        intentions: blocks
            .into_iter()
            .map(|(category, intentions)| CategoryIntentions {
                category,
                intentions: intentions
                    .into_iter()
                    .map(|(code, percentage)| VoteIntention {
                        party_code: code.to_string(),
                        percentage,
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn national(voter: &str, party: &str) -> VoteRequest {
    ballot(voter, vec![(Category::National, vec![(party, 100.0)])])
}

fn fixed() -> FixedSource {
    FixedSource::new(0.05, 2000)
}

// ==================== TESTS: submit ====================

#[test]
fn test_submit_walkthrough() -> Result<()> {
    let (election, metrics) = test_election();

    let round = election.start_round(2024, &[Category::National], 100)?;
    assert_eq!(round.id, 1);
    assert!(round.is_open);

    let receipt = election.submit(&national("A", "X"), &mut fixed())?;
    assert_eq!(receipt.choices, vec![(Category::National, "X".to_string())]);
    assert_eq!(receipt.year, 2024);
    assert_eq!(election.vote_count(), 1);

    let err = election.submit(&national("A", "X"), &mut fixed()).unwrap_err();
    assert!(matches!(
        err,
        VotingError::Rejected(Rejection::AlreadyVoted { .. })
    ));
    assert!(err.to_string().contains("already voted"));
    assert_eq!(election.vote_count(), 1);

    let summary = election.end_round()?;
    assert_eq!(summary.votes, 1);
    assert_eq!(summary.categories, vec![Category::National]);
    assert_eq!(election.statistics().archive().len(), 1);
    assert!(election.current_round().is_none());

    let tags = VoteTags {
        round_id: 1,
        party_code: "X".to_string(),
        category: Category::National,
    };
    assert_eq!(metrics.votes_for(&tags), 1);
    assert_eq!(metrics.total_votes(), 1);

    Ok(())
}

#[test]
fn test_submit_without_round_is_rejected() {
    let (election, metrics) = test_election();

    let err = election.submit(&national("A", "X"), &mut fixed()).unwrap_err();
    assert_eq!(err, VotingError::Rejected(Rejection::NoRoundInProgress));
    assert_eq!(
        err.rejection().map(|r| r.to_string()),
        Some("no voting round is currently in progress".to_string())
    );
    assert_eq!(metrics.total_votes(), 0);
}

#[test]
fn test_submit_checks_request_shape() {
    let (election, _) = test_election();
    election.start_round(2024, &[Category::National], 10).unwrap();

    let err = election.submit(&national("  ", "X"), &mut fixed()).unwrap_err();
    assert!(matches!(err, VotingError::InvalidArgument(_)));

    let empty = VoteRequest {
        voter_id: "A".to_string(),
        intentions: vec![],
    };
    let err = election.submit(&empty, &mut fixed()).unwrap_err();
    assert!(matches!(err, VotingError::InvalidArgument(_)));

    let no_candidates = ballot("A", vec![(Category::National, vec![])]);
    let err = election.submit(&no_candidates, &mut fixed()).unwrap_err();
    assert!(matches!(err, VotingError::InvalidArgument(_)));
    assert_eq!(election.vote_count(), 0);
}

#[test]
fn test_strict_voter_ids() {
    let config = BaseConfig {
        require_valid_voter_ids: true,
        ..BaseConfig::default()
    };
    let election = Election::new(
        config,
        PartyCatalogVariant::mock(&["X"]),
        MetricsSinkVariant::Mock(MockMetrics::new()),
    );
    election.start_round(2024, &[Category::National], 10).unwrap();

    assert!(matches!(
        election.submit(&national("A", "X"), &mut fixed()),
        Err(VotingError::InvalidArgument(_))
    ));
    assert!(election.submit(&national("9202204720082", "X"), &mut fixed()).is_ok());
}

#[test]
fn test_rejected_ballot_records_nothing() {
    let (election, metrics) = test_election();
    election.start_round(2024, &[Category::National], 10).unwrap();

    // Local is not open in this round, so the National vote must not land either
    let request = ballot(
        "A",
        vec![
            (Category::National, vec![("X", 80.0)]),
            (Category::Local, vec![("Y", 80.0)]),
        ],
    );
    let err = election.submit(&request, &mut fixed()).unwrap_err();
    assert_eq!(
        err,
        VotingError::Rejected(Rejection::CategoryNotApplicable(Category::Local))
    );
    assert_eq!(election.vote_count(), 0);
    assert_eq!(metrics.total_votes(), 0);

    let err = election.submit(&national("B", "NOPE"), &mut fixed()).unwrap_err();
    assert_eq!(
        err,
        VotingError::Rejected(Rejection::PartyNotRegistered("NOPE".to_string()))
    );
    assert_eq!(election.vote_count(), 0);
}

#[test]
fn test_party_codes_are_normalised() -> Result<()> {
    let (election, _) = test_election();
    let round = election.start_round(2024, &[Category::National], 10)?;

    election.submit(&national("A", " x "), &mut fixed())?;
    let tally = election.statistics().tally(round.id).unwrap();
    assert_eq!(tally.counts[&Category::National]["X"], 1);
    Ok(())
}

#[test]
fn test_forecast_biases_choice() -> Result<()> {
    let (election, _) = test_election();
    election.start_round(2024, &[Category::National], 10)?;

    // Y carries a 10% forecast: 0.05 * 90 * 0.1 < 0.05 * 20
    let request = ballot("A", vec![(Category::National, vec![("Y", 90.0), ("X", 20.0)])]);
    let receipt = election.submit(&request, &mut fixed())?;
    assert_eq!(receipt.choices[0].1, "X");
    Ok(())
}

#[test]
fn test_multi_category_ballot() -> Result<()> {
    let (election, metrics) = test_election();
    let round = election.start_round(2029, &[Category::National, Category::Provincial], 10)?;

    let request = ballot(
        "A",
        vec![
            (Category::National, vec![("X", 70.0), ("Z", 30.0)]),
            (Category::Provincial, vec![("Z", 60.0), ("X", 40.0)]),
        ],
    );
    let receipt = election.submit(&request, &mut fixed())?;
    assert_eq!(
        receipt.choices,
        vec![
            (Category::National, "X".to_string()),
            (Category::Provincial, "Z".to_string()),
        ]
    );
    // 0.05 * 2000 * 2 parties
    assert_eq!(receipt.think_time, Duration::from_millis(200));
    assert_eq!(election.vote_count(), 2);
    assert_eq!(metrics.total_votes(), 2);
    assert_eq!(metrics.get_latencies(), vec![Duration::from_millis(200)]);

    let tally = election.statistics().tally(round.id).unwrap();
    assert_eq!(tally.total(), 2);
    Ok(())
}

#[test]
fn test_party_code_case_does_not_change_choice() -> Result<()> {
    let (election, metrics) = test_election();
    let round = election.start_round(2024, &[Category::National], 10)?;

    // Y's 10% forecast must apply whatever the letter case of the ballot
    let upper = ballot("A", vec![(Category::National, vec![("Y", 90.0), ("X", 20.0)])]);
    let lower = ballot("B", vec![(Category::National, vec![("y", 90.0), (" x ", 20.0)])]);

    let upper_decision = election.decide(&upper, &mut fixed())?;
    let lower_decision = election.decide(&lower, &mut fixed())?;
    assert_eq!(upper_decision.choices, lower_decision.choices);
    assert_eq!(upper_decision.think_time, lower_decision.think_time);

    election.cast(&upper, &upper_decision)?;
    let receipt = election.cast(&lower, &lower_decision)?;
    assert_eq!(receipt.choices, vec![(Category::National, "X".to_string())]);

    let tally = election.statistics().tally(round.id).unwrap();
    assert_eq!(tally.counts[&Category::National]["X"], 2);
    assert_eq!(metrics.total_votes(), 2);
    Ok(())
}

#[test]
fn test_out_of_range_percentages_are_invalid() {
    let (election, metrics) = test_election();
    election.start_round(2024, &[Category::National], 10).unwrap();

    for percentage in [-500.0, 100.5, f64::NAN, f64::INFINITY] {
        let request = ballot(
            "A",
            vec![(Category::National, vec![("X", 20.0), ("Y", percentage)])],
        );
        let err = election.submit(&request, &mut fixed()).unwrap_err();
        assert!(
            matches!(err, VotingError::InvalidArgument(_)),
            "{percentage}: {err}"
        );
    }
    assert_eq!(election.vote_count(), 0);
    assert!(metrics.get_latencies().is_empty());

    // Both bounds are inclusive
    let edges = ballot("A", vec![(Category::National, vec![("X", 0.0), ("Y", 100.0)])]);
    assert!(election.submit(&edges, &mut fixed()).is_ok());
}

// ==================== TESTS: statistics ====================

#[test]
fn test_statistics_views() -> Result<()> {
    let (election, _) = test_election();

    let status = election.statistics().status();
    assert!(!status.voting_enabled);
    assert_eq!(status.status, "no voting round is currently in progress");
    assert!(matches!(
        election.statistics().current(),
        CurrentRound::NotOpen { .. }
    ));

    let round = election.start_round(2024, &[Category::National], 3)?;
    election.submit(&national("A", "X"), &mut fixed())?;
    election.submit(&national("B", "X"), &mut fixed())?;
    election.submit(&national("C", "Z"), &mut fixed())?;

    assert!(election.statistics().status().voting_enabled);
    match election.statistics().current() {
        CurrentRound::Open(summary) => {
            assert_eq!(summary.round_id, round.id);
            assert_eq!(summary.votes, 3);
            assert_eq!(summary.expected_voters, 3);
        }
        other => panic!("expected open round, got {other:?}"),
    }

    election.end_round()?;
    let tally = election.statistics().tally(round.id).unwrap();
    assert_eq!(tally.leader(Category::National), Some(("X", 2)));
    assert_eq!(tally.total(), 3);
    assert!(election.statistics().tally(99).is_none());
    Ok(())
}

// ==================== TESTS: process_request_once ====================

#[tokio::test]
async fn test_process_request_once_sleeps_before_casting() -> Result<()> {
    let (election, _) = test_election();
    election.start_round(2024, &[Category::National], 10)?;

    // 0.05 * 2000 * 1 party = 100 ms, scaled down to 10 ms
    let started = tokio::time::Instant::now();
    let receipt = election
        .process_request_once(&national("A", "X"), &mut fixed(), Some(0.1))
        .await?;
    assert!(started.elapsed() >= Duration::from_millis(10));
    assert_eq!(receipt.think_time, Duration::from_millis(100));
    assert_eq!(election.vote_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_round_closed_during_think_time_rejects() -> Result<()> {
    let (election, _) = test_election();
    election.start_round(2024, &[Category::National], 10)?;

    let request = national("A", "X");
    let decision = election.decide(&request, &mut fixed())?;
    election.end_round()?;

    let err = election.cast(&request, &decision).unwrap_err();
    assert_eq!(err, VotingError::Rejected(Rejection::NoRoundInProgress));
    assert_eq!(election.statistics().archive()[0].votes, 0);
    Ok(())
}
