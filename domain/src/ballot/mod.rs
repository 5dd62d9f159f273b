//! Ballot types for swarm voting
//!
//! A [`Ballot`] is one judge's recorded opinion for one round: the vote, the
//! evidence it cites, rubric scores, and free-text reasoning. Ballots are
//! created once per successful judge invocation and never updated. A failed
//! invocation produces no ballot at all.

pub mod parsing;

pub use parsing::parse_ballot;

use crate::core::error::DomainError;
use crate::core::model_id::ModelId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A judge's answer to the question: YES, NO, or NULL (unresolvable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Vote {
    Yes,
    No,
    Null,
}

impl Vote {
    /// All vote categories, in canonical order
    pub const ALL: [Vote; 3] = [Vote::Yes, Vote::No, Vote::Null];

    /// Canonical index of this category (YES=0, NO=1, NULL=2)
    pub fn index(self) -> usize {
        match self {
            Vote::Yes => 0,
            Vote::No => 1,
            Vote::Null => 2,
        }
    }

    /// Wire form of this vote
    pub fn as_str(self) -> &'static str {
        match self {
            Vote::Yes => "YES",
            Vote::No => "NO",
            Vote::Null => "NULL",
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Vote {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "YES" => Ok(Vote::Yes),
            "NO" => Ok(Vote::No),
            "NULL" => Ok(Vote::Null),
            other => Err(DomainError::InvalidVote(other.to_string())),
        }
    }
}

/// One judge's structured opinion for one round
///
/// # Example
///
/// ```
/// use verdict_domain::{Ballot, ModelId, Vote};
///
/// let ballot = Ballot::new(1, "source-quality-hawk", ModelId::new("gpt-4o-mini"), Vote::Yes)
///     .with_evidence(vec![1, 3], vec![2])
///     .with_reasoning("Two credible sources confirm the event.");
/// assert_eq!(ballot.vote, Vote::Yes);
/// assert_eq!(ballot.supporting_evidence_ids, vec![1, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    /// Round this ballot was cast in (1-indexed)
    pub round: u32,
    /// Name of the archetype that produced it
    pub archetype: String,
    /// Backend model that produced it
    pub model: ModelId,
    /// The vote itself
    pub vote: Vote,
    /// Evidence ids the judge cited in support of the vote
    #[serde(default)]
    pub supporting_evidence_ids: Vec<u64>,
    /// Evidence ids the judge found contradicting the vote
    #[serde(default)]
    pub refuting_evidence_ids: Vec<u64>,
    /// Rubric criterion name to score in [0, 1]
    #[serde(default)]
    pub rubric_scores: BTreeMap<String, f64>,
    /// Free-text rationale
    #[serde(default)]
    pub reasoning: String,
}

impl Ballot {
    /// Create a new ballot
    pub fn new(round: u32, archetype: impl Into<String>, model: ModelId, vote: Vote) -> Self {
        Self {
            round,
            archetype: archetype.into(),
            model,
            vote,
            supporting_evidence_ids: Vec::new(),
            refuting_evidence_ids: Vec::new(),
            rubric_scores: BTreeMap::new(),
            reasoning: String::new(),
        }
    }

    /// Attach cited evidence ids
    pub fn with_evidence(mut self, supporting: Vec<u64>, refuting: Vec<u64>) -> Self {
        self.supporting_evidence_ids = supporting;
        self.refuting_evidence_ids = refuting;
        self
    }

    /// Attach rubric scores, clamping each to [0, 1]
    pub fn with_rubric_scores(mut self, scores: BTreeMap<String, f64>) -> Self {
        self.rubric_scores = scores
            .into_iter()
            .map(|(name, score)| (name, score.clamp(0.0, 1.0)))
            .collect();
        self
    }

    /// Attach the free-text rationale
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_parse() {
        assert_eq!("YES".parse::<Vote>().unwrap(), Vote::Yes);
        assert_eq!(" no ".parse::<Vote>().unwrap(), Vote::No);
        assert_eq!("null".parse::<Vote>().unwrap(), Vote::Null);
        assert!("MAYBE".parse::<Vote>().is_err());
    }

    #[test]
    fn test_vote_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Vote::Null).unwrap(), "\"NULL\"");
        let vote: Vote = serde_json::from_str("\"YES\"").unwrap();
        assert_eq!(vote, Vote::Yes);
    }

    #[test]
    fn test_vote_index_order() {
        for (i, vote) in Vote::ALL.iter().enumerate() {
            assert_eq!(vote.index(), i);
        }
    }

    #[test]
    fn test_rubric_scores_clamped() {
        let mut scores = BTreeMap::new();
        scores.insert("source_reliability".to_string(), 1.4);
        scores.insert("directness".to_string(), -0.3);

        let ballot = Ballot::new(1, "rubric-literalist", ModelId::new("m"), Vote::No)
            .with_rubric_scores(scores);

        assert_eq!(ballot.rubric_scores["source_reliability"], 1.0);
        assert_eq!(ballot.rubric_scores["directness"], 0.0);
    }
}
