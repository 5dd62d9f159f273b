//! Judge prompt construction
//!
//! Builds the system and user prompts a judge invocation sends to its
//! backend. The system prompt is the archetype's persona plus the strict JSON
//! response contract; the user prompt is the dated question, rubric, and
//! numbered evidence block.

use crate::archetype::Archetype;
use crate::evidence::EvidenceBundle;
use chrono::Utc;

/// Prompt templates for judge invocations
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a judge: persona instructions plus response contract
    pub fn judge_system(archetype: &Archetype) -> String {
        format!(
            "{}\n\n{}",
            archetype.instructions(),
            Self::response_contract()
        )
    }

    /// User prompt for a judge: date, question, rubric, and evidence block
    pub fn judge_user(bundle: &EvidenceBundle) -> String {
        let evidence_block = bundle
            .evidence
            .iter()
            .map(|e| {
                format!(
                    "[Evidence {}] {} - source: {} ({})",
                    e.id, e.snippet, e.url, e.timestamp
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let rubric_block = bundle.rubric.join(", ");
        let today = Utc::now().format("%Y-%m-%d");

        format!(
            "TODAY'S DATE: {today}\n\n\
             QUESTION: {}\n\n\
             EVALUATION RUBRIC: {rubric_block}\n\n\
             EVIDENCE BUNDLE:\n{evidence_block}\n\n\
             Evaluate the question using ONLY the evidence above. \
             Respond with a single JSON object and nothing else.",
            bundle.question
        )
    }

    /// The JSON response format every judge must follow
    fn response_contract() -> &'static str {
        "You MUST only reference evidence items by their ID from the provided \
         evidence bundle. Do not introduce outside knowledge.\n\n\
         Respond with ONLY a JSON object in this exact format (no other text):\n\
         {\n\
         \x20 \"vote\": \"YES\" | \"NO\" | \"NULL\",\n\
         \x20 \"supporting_evidence_ids\": [list of evidence IDs that support your vote],\n\
         \x20 \"refuting_evidence_ids\": [list of evidence IDs that contradict your vote],\n\
         \x20 \"rubric_scores\": {\"criterion_name\": score_between_0_and_1, ...},\n\
         \x20 \"reasoning\": \"Brief explanation of your decision (2-3 sentences max)\"\n\
         }"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::EvidenceItem;

    fn bundle() -> EvidenceBundle {
        EvidenceBundle::new(
            "Did the merger close in Q2?",
            vec!["source_reliability".to_string(), "directness".to_string()],
            vec![EvidenceItem::new(
                7,
                "Press release confirms closing",
                "https://example.org/pr",
                "2026-06-30",
                0.9,
            )],
        )
    }

    #[test]
    fn test_user_prompt_contains_sections() {
        let prompt = PromptTemplate::judge_user(&bundle());

        assert!(prompt.contains("TODAY'S DATE:"));
        assert!(prompt.contains("QUESTION: Did the merger close in Q2?"));
        assert!(prompt.contains("EVALUATION RUBRIC: source_reliability, directness"));
        assert!(prompt.contains("[Evidence 7] Press release confirms closing"));
    }

    #[test]
    fn test_system_prompt_appends_contract() {
        let archetype = Archetype::new("test-persona", "Weigh all evidence equally.");
        let prompt = PromptTemplate::judge_system(&archetype);

        assert!(prompt.starts_with("Weigh all evidence equally."));
        assert!(prompt.contains("\"vote\": \"YES\" | \"NO\" | \"NULL\""));
    }
}
