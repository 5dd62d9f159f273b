//! Core value objects and error types

pub mod error;
pub mod model_id;
