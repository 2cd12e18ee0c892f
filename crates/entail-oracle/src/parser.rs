//! Parse LLM output into an entailment verdict

use crate::OracleError;
use entail_domain::{ClaimId, EntailmentVerdict};
use serde_json::Value;

/// Parse an LLM response into a verdict
///
/// The response must be a single JSON object, optionally wrapped in a
/// markdown code block. `is_valid` is required. The premise lists may be
/// absent or null, but when present they must be arrays of strings.
pub fn parse_verdict(response: &str) -> Result<EntailmentVerdict, OracleError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;
    let obj = json
        .as_object()
        .ok_or_else(|| OracleError::InvalidResponse("Expected JSON object".to_string()))?;

    let is_valid = obj
        .get("is_valid")
        .and_then(Value::as_bool)
        .ok_or_else(|| OracleError::InvalidResponse("Missing or invalid 'is_valid'".to_string()))?;

    let explanation = match obj.get("explanation") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Ok(EntailmentVerdict {
        is_valid,
        explanation,
        redundant_premises: id_list(obj.get("redundant_premises"), "redundant_premises")?,
        degenerate_premises: id_list(obj.get("degenerate_premises"), "degenerate_premises")?,
    })
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, OracleError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(OracleError::InvalidResponse("Empty response".to_string()));
    }

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(OracleError::InvalidResponse("Empty code block".to_string()));
        }

        // Skip the opening fence, and the closing one when present
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Read a list of premise ids
fn id_list(value: Option<&Value>, field: &str) -> Result<Vec<ClaimId>, OracleError> {
    let malformed = || OracleError::InvalidResponse(format!("'{}' must be an array of premise ids", field));
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(ClaimId::from).ok_or_else(malformed))
            .collect(),
        Some(_) => Err(malformed()),
    }
}
