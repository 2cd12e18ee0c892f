//! Deterministic fakes for tests and offline use

use crate::OracleError;
use entail_domain::{ClaimId, EntailmentOracle, EntailmentRequest, EntailmentVerdict, LlmProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a panicking holder poisoned it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Clones share their responses and call count.
///
/// # Examples
///
/// ```
/// use entail_domain::LlmProvider;
/// use entail_oracle::MockProvider;
///
/// let provider = MockProvider::new(r#"{"is_valid": true}"#);
/// assert_eq!(provider.generate("any prompt").unwrap(), r#"{"is_valid": true}"#);
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Result<String, OracleError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>, error: OracleError) {
        lock(&self.responses).insert(prompt.into(), Err(error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// Forget every recorded call
    pub fn reset_call_count(&self) {
        lock(&self.prompts).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"is_valid": true, "explanation": "Default mock verdict"}"#)
    }
}

impl LlmProvider for MockProvider {
    type Error = OracleError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        lock(&self.prompts).push(prompt.to_string());

        match lock(&self.responses).get(prompt) {
            Some(response) => response.clone(),
            None => Ok(self.default_response.clone()),
        }
    }
}

/// Mock oracle returning configured verdicts keyed by conclusion id
///
/// # Examples
///
/// ```
/// use entail_domain::{Claim, EntailmentOracle, EntailmentRequest, ImplicationType};
/// use entail_oracle::MockOracle;
///
/// let oracle = MockOracle::accepting();
/// let premise = Claim::new("a", "It rains");
/// let conclusion = Claim::new("b", "The street is wet");
/// let request = EntailmentRequest::new(&[&premise], &conclusion, ImplicationType::And);
///
/// assert!(oracle.check(&request).unwrap().is_valid);
/// assert_eq!(oracle.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockOracle {
    default_verdict: Result<EntailmentVerdict, OracleError>,
    verdicts: Arc<Mutex<HashMap<ClaimId, Result<EntailmentVerdict, OracleError>>>>,
    requests: Arc<Mutex<Vec<EntailmentRequest>>>,
}

impl MockOracle {
    /// Answer every request with the given verdict
    pub fn new(verdict: EntailmentVerdict) -> Self {
        Self::with_default(Ok(verdict))
    }

    /// Accept every implication
    pub fn accepting() -> Self {
        Self::new(EntailmentVerdict {
            is_valid: true,
            explanation: "Accepted by mock oracle".to_string(),
            ..EntailmentVerdict::default()
        })
    }

    /// Reject every implication
    pub fn rejecting() -> Self {
        Self::new(EntailmentVerdict {
            is_valid: false,
            explanation: "Rejected by mock oracle".to_string(),
            ..EntailmentVerdict::default()
        })
    }

    /// Fail every call with the given error
    pub fn failing(error: OracleError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default_verdict: Result<EntailmentVerdict, OracleError>) -> Self {
        Self {
            default_verdict,
            verdicts: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer requests concluding `conclusion` with a specific verdict
    pub fn set_verdict(&self, conclusion: impl Into<ClaimId>, verdict: EntailmentVerdict) {
        lock(&self.verdicts).insert(conclusion.into(), Ok(verdict));
    }

    /// Fail requests concluding `conclusion`
    pub fn set_error(&self, conclusion: impl Into<ClaimId>, error: OracleError) {
        lock(&self.verdicts).insert(conclusion.into(), Err(error));
    }

    /// Get the number of times check was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<EntailmentRequest> {
        lock(&self.requests).clone()
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::accepting()
    }
}

impl EntailmentOracle for MockOracle {
    type Error = OracleError;

    fn check(&self, request: &EntailmentRequest) -> Result<EntailmentVerdict, Self::Error> {
        lock(&self.requests).push(request.clone());

        match lock(&self.verdicts).get(&request.conclusion.id) {
            Some(verdict) => verdict.clone(),
            None => self.default_verdict.clone(),
        }
    }
}
