//! Infrastructure layer for verdict-swarm
//!
//! Concrete adapters behind the application ports: the OpenAI-compatible HTTP
//! gateway, layered file/env configuration, and verdict storage.

pub mod config;
pub mod providers;
pub mod store;

pub use config::{BackendSection, ConfigLoader, FileConfig};
pub use providers::openai_compat::OpenAiCompatGateway;
pub use store::memory::InMemoryVerdictStore;
