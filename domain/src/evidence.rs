//! Evidence bundle input types
//!
//! The evidence pipeline (search, trust scoring, content hashing) is external
//! to this crate. What arrives here is a frozen [`EvidenceBundle`]: the
//! question, the rubric, the collected evidence items, and the Merkle root of
//! the bundle contents. The aggregation core never mutates or re-derives it.

use serde::{Deserialize, Serialize};

/// A single piece of collected evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Stable identifier judges use to cite this item
    pub id: u64,
    /// Short excerpt of the evidence content
    pub snippet: String,
    /// Source locator (URL or equivalent)
    pub url: String,
    /// Timestamp of the evidence, as recorded by the collector
    pub timestamp: String,
    /// Source quality score in [0, 1]
    pub quality_score: f64,
}

impl EvidenceItem {
    /// Create a new evidence item, clamping the quality score to [0, 1]
    pub fn new(
        id: u64,
        snippet: impl Into<String>,
        url: impl Into<String>,
        timestamp: impl Into<String>,
        quality_score: f64,
    ) -> Self {
        Self {
            id,
            snippet: snippet.into(),
            url: url.into(),
            timestamp: timestamp.into(),
            quality_score: quality_score.clamp(0.0, 1.0),
        }
    }
}

/// Frozen input for one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    /// The yes/no/null factual question under evaluation
    pub question: String,
    /// Ordered list of rubric criterion names judges score against
    pub rubric: Vec<String>,
    /// Collected evidence items
    pub evidence: Vec<EvidenceItem>,
    /// Merkle root of the bundle contents, computed by the evidence pipeline
    #[serde(default)]
    pub merkle_root: String,
}

impl EvidenceBundle {
    /// Create a new evidence bundle
    pub fn new(
        question: impl Into<String>,
        rubric: Vec<String>,
        evidence: Vec<EvidenceItem>,
    ) -> Self {
        Self {
            question: question.into(),
            rubric,
            evidence,
            merkle_root: String::new(),
        }
    }

    /// Attach the Merkle root digest supplied by the evidence pipeline
    pub fn with_merkle_root(mut self, root: impl Into<String>) -> Self {
        self.merkle_root = root.into();
        self
    }
}
