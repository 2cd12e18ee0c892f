//! Entailment oracle backed by a language model

use crate::parser::parse_verdict;
use crate::prompt::PromptBuilder;
use crate::OracleError;
use entail_domain::{EntailmentOracle, EntailmentRequest, EntailmentVerdict, LlmProvider};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Oracle that asks an [`LlmProvider`] and parses its JSON verdict
///
/// # Examples
///
/// ```
/// use entail_domain::{Claim, EntailmentOracle, EntailmentRequest, ImplicationType};
/// use entail_oracle::{LlmOracle, MockProvider};
///
/// let provider = MockProvider::new(r#"{"is_valid": true, "explanation": "Direct"}"#);
/// let oracle = LlmOracle::new(provider);
///
/// let premise = Claim::new("a", "Socrates is a man");
/// let conclusion = Claim::new("b", "Socrates is mortal");
/// let request = EntailmentRequest::new(&[&premise], &conclusion, ImplicationType::And);
///
/// let verdict = oracle.check(&request).unwrap();
/// assert!(verdict.is_valid);
/// ```
#[derive(Debug, Clone)]
pub struct LlmOracle<L> {
    provider: L,
}

impl<L> LlmOracle<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Wrap a provider
    pub fn new(provider: L) -> Self {
        Self { provider }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &L {
        &self.provider
    }
}

impl<L> EntailmentOracle for LlmOracle<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    type Error = OracleError;

    fn check(&self, request: &EntailmentRequest) -> Result<EntailmentVerdict, Self::Error> {
        let prompt = PromptBuilder::new(request).build();
        debug!(
            conclusion = %request.conclusion.id,
            premises = request.premises.len(),
            prompt_len = prompt.len(),
            "Requesting entailment verdict"
        );

        let response = self
            .provider
            .generate(&prompt)
            .map_err(|e| OracleError::Communication(e.to_string()))?;

        match parse_verdict(&response) {
            Ok(verdict) => {
                info!(
                    conclusion = %request.conclusion.id,
                    is_valid = verdict.is_valid,
                    "Received entailment verdict"
                );
                Ok(verdict)
            }
            Err(e) => {
                warn!(conclusion = %request.conclusion.id, "Unusable verdict: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockProvider;
    use entail_domain::{check_implication, Claim, ClaimId, EntailmentStatus, ImplicationType};

    fn claims() -> (Claim, Claim, Claim) {
        (
            Claim::new("c1", "The reactor is critical").with_score(8.0),
            Claim::new("c2", "The moderator is present"),
            Claim::new("hypothesis", "The reactor produces power"),
        )
    }

    #[test]
    fn test_valid_verdict_passes() {
        let oracle = LlmOracle::new(MockProvider::new(r#"{"is_valid": true, "explanation": "ok"}"#));
        let (c1, c2, h) = claims();

        let outcome = check_implication(&[&c1, &c2], &h, ImplicationType::And, &oracle).unwrap();
        assert_eq!(outcome.status, EntailmentStatus::Passed);
        assert_eq!(outcome.explanation, "ok");
    }

    #[test]
    fn test_redundant_premise_fails_and() {
        let oracle = LlmOracle::new(MockProvider::new(
            "```json\n{\"is_valid\": true, \"explanation\": \"c1 suffices\", \"redundant_premises\": [\"c2\"]}\n```",
        ));
        let (c1, c2, h) = claims();

        let outcome = check_implication(&[&c1, &c2], &h, ImplicationType::And, &oracle).unwrap();
        assert_eq!(outcome.status, EntailmentStatus::Failed);
        assert_eq!(outcome.verdict.redundant_premises, vec![ClaimId::from("c2")]);
        assert!(outcome.explanation.contains("Redundant premises: c2"));
    }

    #[test]
    fn test_prompt_reaches_provider() {
        let provider = MockProvider::new(r#"{"is_valid": false}"#);
        let oracle = LlmOracle::new(provider.clone());
        let (c1, _, h) = claims();

        check_implication(&[&c1], &h, ImplicationType::Or, &oracle).unwrap();
        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("[c1] The reactor is critical"));
        assert!(!prompts[0].contains("8.0"));
    }

    #[test]
    fn test_malformed_output_is_invalid_response() {
        let oracle = LlmOracle::new(MockProvider::new("I think so, yes."));
        let (c1, _, h) = claims();

        let err = check_implication(&[&c1], &h, ImplicationType::And, &oracle).unwrap_err();
        assert!(matches!(err, OracleError::InvalidResponse(_)));
    }

    #[test]
    fn test_malformed_premise_list_is_not_a_pass() {
        let oracle = LlmOracle::new(MockProvider::new(r#"{"is_valid": true, "redundant_premises": "c2"}"#));
        let (c1, c2, h) = claims();

        let err = check_implication(&[&c1, &c2], &h, ImplicationType::And, &oracle).unwrap_err();
        assert!(matches!(err, OracleError::InvalidResponse(_)));
    }

    #[test]
    fn test_provider_error_is_communication() {
        let provider = MockProvider::default();
        let oracle = LlmOracle::new(provider.clone());
        let (c1, _, h) = claims();
        let request = EntailmentRequest::new(&[&c1], &h, ImplicationType::And);
        provider.add_error(PromptBuilder::new(&request).build(), OracleError::RateLimitExceeded);

        let err = oracle.check(&request).unwrap_err();
        assert_eq!(err, OracleError::Communication("Rate limit exceeded".to_string()));
    }
}
