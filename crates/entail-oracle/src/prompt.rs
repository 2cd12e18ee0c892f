//! Prompt construction for entailment checks

use entail_domain::{EntailmentRequest, ImplicationType};

/// Builds the prompt sent to the LLM for one implication
///
/// Only claim ids, claim texts and the connective are included. Scores,
/// evidence and reasoning never reach the model.
pub struct PromptBuilder<'a> {
    request: &'a EntailmentRequest,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(request: &'a EntailmentRequest) -> Self {
        Self { request }
    }

    /// Build the complete entailment prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ENTAILMENT_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(self.connective_rule());
        prompt.push_str("\n\n");

        prompt.push_str("Premises:\n");
        for premise in &self.request.premises {
            prompt.push_str(&format!("- [{}] {}\n", premise.id, premise.text));
        }
        prompt.push('\n');

        prompt.push_str(&format!(
            "Conclusion:\n- [{}] {}\n\n",
            self.request.conclusion.id, self.request.conclusion.text
        ));

        prompt.push_str(match self.request.implication_type {
            ImplicationType::And => AND_OUTPUT_FORMAT,
            ImplicationType::Or => OR_OUTPUT_FORMAT,
        });

        prompt
    }

    fn connective_rule(&self) -> &'static str {
        match self.request.implication_type {
            ImplicationType::And => AND_RULE,
            ImplicationType::Or => OR_RULE,
        }
    }
}

const ENTAILMENT_INSTRUCTIONS: &str = r#"Decide whether the premises below logically entail the conclusion.
Judge the logic only: assume every premise is true and ask whether the conclusion must then be true.
Do not judge whether the premises themselves are plausible."#;

const AND_RULE: &str = r#"Connective: AND. The premises are taken together.
Also report:
- redundant premises: premises that can be removed while the rest still entail the conclusion
- degenerate premises: premises that are trivially entailed by the conclusion itself"#;

const OR_RULE: &str = r#"Connective: OR. Each premise is an alternative.
The implication holds when every single premise, on its own, entails the conclusion."#;

const AND_OUTPUT_FORMAT: &str = r#"Output format (JSON object only, no additional text):
{
  "is_valid": true or false,
  "explanation": "short reasoning",
  "redundant_premises": ["premise id", ...],
  "degenerate_premises": ["premise id", ...]
}

Refer to premises by the ids shown in brackets."#;

const OR_OUTPUT_FORMAT: &str = r#"Output format (JSON object only, no additional text):
{
  "is_valid": true or false,
  "explanation": "short reasoning"
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use entail_domain::{Claim, Evidence, Testability};

    fn request(implication_type: ImplicationType) -> EntailmentRequest {
        let a = Claim::new("a", "All metals conduct electricity")
            .with_score(9.5)
            .with_reasoning("textbook")
            .with_testability(Testability::Testable)
            .with_evidence(Evidence::literature("Physics 101", "chapter 4"));
        let b = Claim::new("b", "Copper is a metal");
        let c = Claim::new("hypothesis", "Copper conducts electricity");
        EntailmentRequest::new(&[&a, &b], &c, implication_type)
    }

    #[test]
    fn test_prompt_includes_ids_and_texts() {
        let request = request(ImplicationType::And);
        let prompt = PromptBuilder::new(&request).build();

        assert!(prompt.contains("- [a] All metals conduct electricity"));
        assert!(prompt.contains("- [b] Copper is a metal"));
        assert!(prompt.contains("- [hypothesis] Copper conducts electricity"));
    }

    #[test]
    fn test_prompt_withholds_scores_and_evidence() {
        let request = request(ImplicationType::And);
        let prompt = PromptBuilder::new(&request).build();

        assert!(!prompt.contains("9.5"));
        assert!(!prompt.contains("Physics 101"));
        assert!(!prompt.contains("textbook"));
    }

    #[test]
    fn test_and_prompt_asks_for_premise_diagnostics() {
        let request = request(ImplicationType::And);
        let prompt = PromptBuilder::new(&request).build();

        assert!(prompt.contains("Connective: AND"));
        assert!(prompt.contains("redundant_premises"));
        assert!(prompt.contains("degenerate_premises"));
    }

    #[test]
    fn test_or_prompt_omits_premise_diagnostics() {
        let request = request(ImplicationType::Or);
        let prompt = PromptBuilder::new(&request).build();

        assert!(prompt.contains("Connective: OR"));
        assert!(!prompt.contains("redundant_premises"));
    }
}
