use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;

use crate::types::VoteRequest;

/// Trait for producers of vote submissions (load generators, replay files, ...).
///
/// Implementations push `VoteRequest`s into the provided channel and drop the
/// sender when they run out, which lets the submission workers drain and stop.
#[async_trait]
pub trait VoterSource: Send + Sync {
    /// Human-readable source name for logging.
    fn name(&self) -> &'static str;

    /// Start producing requests into `tx`.
    ///
    /// Typical implementation spawns a task that owns `tx` and sends until
    /// exhausted or until the receiving side is closed.
    async fn open(&mut self, tx: AsyncSender<VoteRequest>) -> Result<()>;

    /// Stop producing and release resources.
    async fn close(&mut self) -> Result<()>;
}
