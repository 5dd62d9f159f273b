//! Verdict persistence port

use async_trait::async_trait;
use thiserror::Error;
use verdict_domain::VerdictDistribution;

/// Errors from a verdict store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to persist verdict: {0}")]
    WriteFailed(String),

    #[error("Failed to read verdicts: {0}")]
    ReadFailed(String),
}

/// Append-only storage for completed verdicts
#[async_trait]
pub trait VerdictStore: Send + Sync {
    /// Persist a completed verdict
    async fn append(&self, verdict: &VerdictDistribution) -> Result<(), StoreError>;

    /// All stored verdicts for a question, oldest first
    async fn lookup(&self, question: &str) -> Result<Vec<VerdictDistribution>, StoreError>;
}
