//! Judge invocation port
//!
//! A judge is one (archetype, backend) pairing evaluating the evidence bundle
//! once. Failures are absorbed here: a judge that errors or answers
//! unparseable text simply casts no ballot, and the round continues without
//! it.

use crate::ports::backend_gateway::BackendGateway;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use verdict_domain::{Archetype, Ballot, EvidenceBundle, ModelId, PromptTemplate, parse_ballot};

/// Runs a single judge against the evidence bundle
#[async_trait]
pub trait JudgeInvoker: Send + Sync {
    /// Evaluate the bundle as `archetype` on `model`
    ///
    /// Returns `None` when the invocation fails or the response cannot be
    /// parsed into a ballot. Never propagates an error; a failed judge is a
    /// missing ballot, not a failed round.
    async fn evaluate(
        &self,
        archetype: &Archetype,
        model: &ModelId,
        bundle: &EvidenceBundle,
        round: u32,
    ) -> Option<Ballot>;
}

/// The production judge: prompts built from the domain templates, sent
/// through a [`BackendGateway`]
pub struct GatewayJudge<G> {
    gateway: Arc<G>,
    temperature: f64,
}

impl<G> GatewayJudge<G> {
    pub fn new(gateway: Arc<G>, temperature: f64) -> Self {
        Self {
            gateway,
            temperature,
        }
    }
}

#[async_trait]
impl<G: BackendGateway> JudgeInvoker for GatewayJudge<G> {
    async fn evaluate(
        &self,
        archetype: &Archetype,
        model: &ModelId,
        bundle: &EvidenceBundle,
        round: u32,
    ) -> Option<Ballot> {
        let system_prompt = PromptTemplate::judge_system(archetype);
        let user_prompt = PromptTemplate::judge_user(bundle);

        let response = match self
            .gateway
            .complete(model, &system_prompt, &user_prompt, self.temperature)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(round, %archetype, model = %model, error = %e, "Judge invocation failed");
                return None;
            }
        };

        match parse_ballot(round, archetype.name(), model.clone(), &response) {
            Ok(ballot) => {
                debug!(round, %archetype, model = %model, vote = %ballot.vote, "Ballot cast");
                Some(ballot)
            }
            Err(e) => {
                warn!(round, %archetype, model = %model, error = %e, "Unparseable judge response");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backend_gateway::GatewayError;
    use verdict_domain::Vote;

    struct FixedGateway {
        response: Result<String, GatewayError>,
    }

    #[async_trait]
    impl BackendGateway for FixedGateway {
        async fn complete(
            &self,
            _model: &ModelId,
            _system_prompt: &str,
            _user_prompt: &str,
            _temperature: f64,
        ) -> Result<String, GatewayError> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(GatewayError::Other(e.to_string())),
            }
        }

        async fn available_models(&self) -> Result<Vec<ModelId>, GatewayError> {
            Ok(vec![ModelId::new("m1")])
        }
    }

    fn bundle() -> EvidenceBundle {
        EvidenceBundle::new("Q?", vec![], vec![])
    }

    fn archetype() -> Archetype {
        Archetype::new("test-persona", "Judge fairly.")
    }

    #[tokio::test]
    async fn test_successful_evaluation_casts_ballot() {
        let gateway = Arc::new(FixedGateway {
            response: Ok(r#"{"vote": "YES", "reasoning": "clear"}"#.to_string()),
        });
        let judge = GatewayJudge::new(gateway, 0.8);

        let ballot = judge
            .evaluate(&archetype(), &ModelId::new("m1"), &bundle(), 2)
            .await
            .unwrap();
        assert_eq!(ballot.vote, Vote::Yes);
        assert_eq!(ballot.round, 2);
        assert_eq!(ballot.archetype, "test-persona");
    }

    #[tokio::test]
    async fn test_gateway_failure_casts_nothing() {
        let gateway = Arc::new(FixedGateway {
            response: Err(GatewayError::Timeout(30)),
        });
        let judge = GatewayJudge::new(gateway, 0.8);

        let ballot = judge
            .evaluate(&archetype(), &ModelId::new("m1"), &bundle(), 1)
            .await;
        assert!(ballot.is_none());
    }

    #[tokio::test]
    async fn test_unparseable_response_casts_nothing() {
        let gateway = Arc::new(FixedGateway {
            response: Ok("I cannot answer that.".to_string()),
        });
        let judge = GatewayJudge::new(gateway, 0.8);

        let ballot = judge
            .evaluate(&archetype(), &ModelId::new("m1"), &bundle(), 1)
            .await;
        assert!(ballot.is_none());
    }
}
