//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid vote value: {0}")]
    InvalidVote(String),

    #[error("No JSON object found in judge response")]
    NoJsonObject,

    #[error("Malformed ballot JSON: {0}")]
    MalformedBallot(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_vote_display() {
        let error = DomainError::InvalidVote("MAYBE".to_string());
        assert_eq!(error.to_string(), "Invalid vote value: MAYBE");
    }

    #[test]
    fn test_no_json_object_display() {
        let error = DomainError::NoJsonObject;
        assert_eq!(error.to_string(), "No JSON object found in judge response");
    }
}
