use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;

use super::{mock::MockVoters, synthetic::SyntheticVoters};
use crate::traits::VoterSource;
use crate::types::VoteRequest;

/// Enum representing all possible voter source implementations.
pub enum VoterSourceVariant {
    Mock(MockVoters),
    Synthetic(SyntheticVoters),
}

#[async_trait]
impl VoterSource for VoterSourceVariant {
    fn name(&self) -> &'static str {
        match self {
            VoterSourceVariant::Mock(inner) => inner.name(),
            VoterSourceVariant::Synthetic(inner) => inner.name(),
        }
    }

    async fn open(&mut self, tx: AsyncSender<VoteRequest>) -> Result<()> {
        match self {
            VoterSourceVariant::Mock(inner) => inner.open(tx).await,
            VoterSourceVariant::Synthetic(inner) => inner.open(tx).await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self {
            VoterSourceVariant::Mock(inner) => inner.close().await,
            VoterSourceVariant::Synthetic(inner) => inner.close().await,
        }
    }
}
