//! In-memory verdict store

use async_trait::async_trait;
use tokio::sync::RwLock;
use verdict_application::ports::verdict_store::{StoreError, VerdictStore};
use verdict_domain::VerdictDistribution;

/// Process-local, append-only verdict store
///
/// Holds every verdict appended during the process lifetime. Suitable for
/// single runs and tests; nothing survives a restart.
#[derive(Default)]
pub struct InMemoryVerdictStore {
    verdicts: RwLock<Vec<VerdictDistribution>>,
}

impl InMemoryVerdictStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VerdictStore for InMemoryVerdictStore {
    async fn append(&self, verdict: &VerdictDistribution) -> Result<(), StoreError> {
        self.verdicts.write().await.push(verdict.clone());
        Ok(())
    }

    async fn lookup(&self, question: &str) -> Result<Vec<VerdictDistribution>, StoreError> {
        let verdicts = self.verdicts.read().await;
        Ok(verdicts
            .iter()
            .filter(|v| v.question == question)
            .cloned()
            .collect())
    }
}
