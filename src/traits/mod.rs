pub mod metrics_sink;
pub mod party_catalog;
pub mod voter_source;

pub use metrics_sink::MetricEvent;
pub use metrics_sink::MetricsSink;
pub use party_catalog::PartyCatalog;
pub use voter_source::VoterSource;
