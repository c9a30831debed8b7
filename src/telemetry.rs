use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter: votesim at info. Set `RUST_LOG=votesim=debug` to see
/// per-vote rejections from the submission workers.
pub const DEFAULT_FILTER: &str = "votesim=info";

/// Install the global subscriber for the simulator binary.
///
/// Submission workers run on many runtime threads and log inside a
/// `submission_worker` span, so events carry thread ids and span context.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_target(false),
        )
        .init();
}
