//! Verdict store implementations

pub mod memory;
