//! Ports (interfaces) that the infrastructure layer implements

pub mod backend_gateway;
pub mod judge;
pub mod verdict_store;
