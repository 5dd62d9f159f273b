//! Backend gateway port
//!
//! A gateway is one connection to a model-serving endpoint. The orchestrator
//! only ever sees the [`BackendPool`] view: which models exist and how to run
//! a completion against one of them.

use async_trait::async_trait;
use thiserror::Error;
use verdict_domain::ModelId;

/// Errors a gateway can produce
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Failed to connect to backend: {0}")]
    ConnectionError(String),

    #[error("Completion request failed: {0}")]
    RequestFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Gateway error: {0}")]
    Other(String),
}

/// A connection to one completion backend
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Run a single chat completion and return the raw response text
    async fn complete(
        &self,
        model: &ModelId,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
    ) -> Result<String, GatewayError>;

    /// The models this gateway can serve
    async fn available_models(&self) -> Result<Vec<ModelId>, GatewayError>;
}

/// The orchestrator's view of the available backends
///
/// Today a pool is always a single gateway (the blanket impl below); the
/// seam keeps the orchestrator indifferent to how many endpoints sit behind
/// it.
#[async_trait]
pub trait BackendPool: Send + Sync {
    /// Every model currently available across the pool
    async fn available_models(&self) -> Result<Vec<ModelId>, GatewayError>;
}

#[async_trait]
impl<G: BackendGateway> BackendPool for G {
    async fn available_models(&self) -> Result<Vec<ModelId>, GatewayError> {
        BackendGateway::available_models(self).await
    }
}
