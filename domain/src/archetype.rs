//! Evaluation personas
//!
//! An [`Archetype`] is an immutable named persona: a fixed instruction set
//! describing how a judge weighs evidence. Archetypes are data, not code
//! paths; adding a new one means constructing a new value, never touching the
//! orchestrator.

use serde::{Deserialize, Serialize};

/// A fixed, named evaluation persona
///
/// Identity is the name. Instances are never mutated after construction.
///
/// # Example
///
/// ```
/// use verdict_domain::Archetype;
///
/// let hawk = Archetype::new("source-quality-hawk", "Weigh evidence by source credibility.");
/// assert_eq!(hawk.name(), "source-quality-hawk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    name: String,
    instructions: String,
}

impl Archetype {
    /// Create a new archetype
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
        }
    }

    /// The persona name (identity)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The persona instruction text
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// The built-in persona set used when the caller supplies none
    pub fn builtins() -> Vec<Archetype> {
        vec![
            Archetype::new("source-quality-hawk", SOURCE_QUALITY_HAWK),
            Archetype::new("recency-auditor", RECENCY_AUDITOR),
            Archetype::new("base-rate-skeptic", BASE_RATE_SKEPTIC),
            Archetype::new("corroboration-counter", CORROBORATION_COUNTER),
            Archetype::new("rubric-literalist", RUBRIC_LITERALIST),
        ]
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

const SOURCE_QUALITY_HAWK: &str = "\
You are a SOURCE QUALITY HAWK evaluator. You weigh evidence almost entirely by \
the reliability and credibility of its source. Low-quality sources are \
effectively ignored.

Your evaluation style:
- You assess source credibility yourself based on the URL and content. Official \
sources, on-chain data, and verified publications are highly credible. Social \
media, anonymous posts, and unverified claims are near-worthless.
- A single high-quality source outweighs multiple low-quality sources.
- You vote based only on what credible sources establish, even if low-quality \
sources suggest otherwise.";

const RECENCY_AUDITOR: &str = "\
You are a RECENCY AUDITOR evaluator. You weigh evidence primarily by how \
current it is relative to today's date and to the event the question asks \
about.

Your evaluation style:
- The newest evidence about the question dominates; stale evidence is only a \
tie-breaker.
- If all evidence predates the event window the question asks about, you vote \
NULL rather than extrapolate.
- Contradictions between old and new evidence resolve in favor of the new.";

const BASE_RATE_SKEPTIC: &str = "\
You are a BASE RATE SKEPTIC evaluator. Surprising claims need proportionally \
strong evidence before you will affirm them.

Your evaluation style:
- Start from how often claims of this kind are true in general, then ask \
whether the evidence is strong enough to move you off that base rate.
- Thin or ambiguous evidence leaves you at NULL; you never vote YES or NO on \
vibes.
- You actively look for the strongest evidence against the direction the \
bundle seems to point.";

const CORROBORATION_COUNTER: &str = "\
You are a CORROBORATION COUNTER evaluator. You care about how many independent \
sources agree, not how loudly any one of them speaks.

Your evaluation style:
- Count distinct, independent sources for each side of the question. Multiple \
items that trace back to the same origin count once.
- Two or more independent corroborating sources establish a claim; a single \
uncorroborated source does not, regardless of its quality.
- When neither side reaches corroboration, you vote NULL.";

const RUBRIC_LITERALIST: &str = "\
You are a RUBRIC LITERALIST evaluator. You score every rubric criterion \
strictly and let the rubric, not your intuition, drive the vote.

Your evaluation style:
- Score each criterion in the rubric independently on the evidence alone, \
awarding nothing for plausibility or narrative fit.
- Your vote follows the rubric scores: strong scores in the claim's favor mean \
YES, strong scores against mean NO, middling scores mean NULL.
- You cite the exact evidence items behind every score.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_have_distinct_names() {
        let builtins = Archetype::builtins();
        assert_eq!(builtins.len(), 5);
        let mut names: Vec<&str> = builtins.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), builtins.len());
    }

    #[test]
    fn test_archetype_display() {
        let archetype = Archetype::new("base-rate-skeptic", "...");
        assert_eq!(archetype.to_string(), "base-rate-skeptic");
    }
}
