use anyhow::{bail, Result};
use async_trait::async_trait;
use kanal::AsyncSender;

use crate::traits::VoterSource;
use crate::types::VoteRequest;

/// Replays a fixed list of requests.
#[derive(Default)]
pub struct MockVoters {
    pub requests: Vec<VoteRequest>,
    pub delay_ms: u64,
    /// When set, `open` fails before sending anything.
    pub fail_on_open: bool,
}

impl MockVoters {
    pub fn new(requests: Vec<VoteRequest>, delay_ms: u64) -> Self {
        Self {
            requests,
            delay_ms,
            fail_on_open: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_on_open: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl VoterSource for MockVoters {
    fn name(&self) -> &'static str {
        "mock-voters"
    }

    async fn open(&mut self, tx: AsyncSender<VoteRequest>) -> Result<()> {
        if self.fail_on_open {
            bail!("mock voter source refused to open");
        }
        let requests = std::mem::take(&mut self.requests);
        let delay = self.delay_ms;

        tokio::spawn(async move {
            for request in requests {
                if delay > 0 {
                    tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                }
                if tx.send(request).await.is_err() {
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
