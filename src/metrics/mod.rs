pub mod channel;
pub mod mock;
pub mod noop;
pub mod variant;

pub use channel::ChannelMetrics;
pub use mock::MockMetrics;
pub use noop::NoopMetrics;
pub use variant::MetricsSinkVariant;
