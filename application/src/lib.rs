//! Application layer for verdict-swarm
//!
//! Defines the ports (trait seams) the orchestration depends on and the use
//! cases that drive polling rounds against those ports. Infrastructure
//! adapters implement the ports; this crate never talks to a network or a
//! filesystem itself.

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::{ConfigError, SwarmConfig};
pub use ports::backend_gateway::{BackendGateway, BackendPool, GatewayError};
pub use ports::judge::{GatewayJudge, JudgeInvoker};
pub use ports::verdict_store::{StoreError, VerdictStore};
pub use use_cases::run_swarm::{
    RunSwarmError, RunSwarmInput, RunSwarmUseCase, SwarmEvent, SwarmStream,
};
