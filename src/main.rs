use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use votesim::election::collect_metrics;
use votesim::traits::PartyCatalog;
use votesim::{
    BaseConfig, Election, MetricsSinkVariant, PartyCatalogVariant, SyntheticVoters,
    VoterSourceVariant,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize telemetry
    votesim::telemetry::init();
    info!("Starting votesim");

    // Parse configuration from CLI arguments
    let config = BaseConfig::parse();
    info!(
        "Configuration: year={}, categories={:?}, voters={}, workers={}",
        config.year, config.categories, config.voters, config.workers
    );

    let (metrics_tx, metrics_rx) = kanal::unbounded();
    let collector = tokio::spawn(collect_metrics(metrics_rx.to_async()));

    let catalog = PartyCatalogVariant::seeded();
    let party_codes = catalog.parties().iter().map(|p| p.code.clone()).collect();
    let source = VoterSourceVariant::Synthetic(
        SyntheticVoters::new(config.voters, config.categories.clone(), party_codes)
            .with_max_parties(config.max_parties)
            .with_repeat_ratio(config.repeat_ratio)
            .with_seed(config.seed),
    );

    let election = Arc::new(Election::new(
        config,
        catalog,
        MetricsSinkVariant::new_channel(metrics_tx),
    ));
    let report = election.run(source).await?;

    // The collector stops once the last sender, owned by the election, is dropped
    let metrics = collector.await?;
    info!(
        "Metrics: {} votes counted, {} latency samples (mean {:.1} ms, max {} ms)",
        metrics.votes_total, metrics.latency_count, metrics.latency_mean_ms, metrics.latency_max_ms
    );

    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("votesim shutdown complete");
    Ok(())
}
