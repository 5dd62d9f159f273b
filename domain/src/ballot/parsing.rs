//! Ballot extraction from judge responses
//!
//! Judges are instructed to answer with a single JSON object, but real model
//! output arrives wrapped in markdown fences, prose, or with cited evidence
//! written as `Evidence 3` instead of `3`. These functions recover the
//! structured ballot from that text. Pure domain logic: no I/O, no session
//! management.

use super::{Ballot, Vote};
use crate::core::error::DomainError;
use crate::core::model_id::ModelId;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw wire shape of a judge's JSON answer
#[derive(Debug, Deserialize)]
struct RawBallot {
    vote: String,
    #[serde(default)]
    supporting_evidence_ids: Vec<u64>,
    #[serde(default)]
    refuting_evidence_ids: Vec<u64>,
    #[serde(default)]
    rubric_scores: BTreeMap<String, f64>,
    #[serde(default)]
    reasoning: String,
}

/// Parse a judge response into a [`Ballot`]
///
/// Tolerates markdown fences and surrounding prose by extracting the first
/// `{` to the last `}`, and repairs unquoted evidence references
/// (`Evidence 3` becomes `3`) before giving up.
///
/// # Errors
///
/// Returns [`DomainError::NoJsonObject`] when the response contains no JSON
/// object, [`DomainError::MalformedBallot`] when it cannot be deserialized,
/// and [`DomainError::InvalidVote`] when the vote value is not YES/NO/NULL.
pub fn parse_ballot(
    round: u32,
    archetype: &str,
    model: ModelId,
    response: &str,
) -> Result<Ballot, DomainError> {
    let candidate = extract_json(response)?;

    let raw: RawBallot = serde_json::from_str(candidate)
        .or_else(|_| serde_json::from_str(&sanitize_evidence_refs(candidate)))?;

    let vote: Vote = raw.vote.parse()?;

    Ok(Ballot::new(round, archetype, model, vote)
        .with_evidence(raw.supporting_evidence_ids, raw.refuting_evidence_ids)
        .with_rubric_scores(raw.rubric_scores)
        .with_reasoning(raw.reasoning))
}

/// Slice out the JSON object candidate from free-form model output
fn extract_json(text: &str) -> Result<&str, DomainError> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Ok(trimmed);
    }

    let start = trimmed.find('{').ok_or(DomainError::NoJsonObject)?;
    let end = trimmed.rfind('}').ok_or(DomainError::NoJsonObject)?;
    if end < start {
        return Err(DomainError::NoJsonObject);
    }
    Ok(&trimmed[start..=end])
}

/// Rewrite unquoted evidence references like `[Evidence 2, Evidence 3]` to `[2, 3]`
fn sanitize_evidence_refs(raw: &str) -> String {
    const MARKER: &str = "Evidence ";

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find(MARKER) {
        let (head, tail) = rest.split_at(pos);
        out.push_str(head);
        let after = &tail[MARKER.len()..];
        let digits = after
            .char_indices()
            .take_while(|(_, c)| c.is_ascii_digit())
            .count();
        if digits == 0 {
            out.push_str(MARKER);
            rest = after;
        } else {
            out.push_str(&after[..digits]);
            rest = &after[digits..];
        }
    }
    out.push_str(rest);
    out
}
