//! Evidence attached to claims
//!
//! Evidence is a tagged union keyed by `type`. Each variant has a fixed set of
//! required fields; anything else is kept in `extra` so that documents survive
//! a round trip and the validator can report it as a warning.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kind of an evidence item, i.e. the value of its `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceKind {
    /// Output of a simulation run
    Simulation,
    /// A published reference
    Literature,
    /// A worked calculation
    Calculation,
}

impl EvidenceKind {
    /// All kinds, in schema order
    pub const ALL: [EvidenceKind; 3] = [
        EvidenceKind::Simulation,
        EvidenceKind::Literature,
        EvidenceKind::Calculation,
    ];

    /// The `type` tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::Simulation => "simulation",
            EvidenceKind::Literature => "literature",
            EvidenceKind::Calculation => "calculation",
        }
    }

    /// Parse a `type` tag
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "simulation" => Some(EvidenceKind::Simulation),
            "literature" => Some(EvidenceKind::Literature),
            "calculation" => Some(EvidenceKind::Calculation),
            _ => None,
        }
    }

    /// Fields every item of this kind must carry (besides `type`)
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            EvidenceKind::Simulation => &["source", "lines"],
            EvidenceKind::Literature => &["source", "reference_text"],
            EvidenceKind::Calculation => &["equations", "program"],
        }
    }
}

impl std::str::FromStr for EvidenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown evidence type: {}", s))
    }
}

/// Simulation evidence: a script and the lines that produced the result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvidence {
    /// Path or name of the simulation source
    pub source: String,
    /// Line range inside the source
    pub lines: String,
    /// Unrecognized fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Literature evidence: a citation plus the quoted passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteratureEvidence {
    /// Bibliographic source
    pub source: String,
    /// The referenced text
    pub reference_text: String,
    /// Unrecognized fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Calculation evidence: equations and the program that evaluates them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationEvidence {
    /// The equations used
    pub equations: String,
    /// The program computing the result
    pub program: String,
    /// Unrecognized fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single evidence item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Evidence {
    /// Simulation output
    Simulation(SimulationEvidence),
    /// Published literature
    Literature(LiteratureEvidence),
    /// Worked calculation
    Calculation(CalculationEvidence),
}

impl Evidence {
    /// Build a simulation item
    pub fn simulation(source: impl Into<String>, lines: impl Into<String>) -> Self {
        Evidence::Simulation(SimulationEvidence {
            source: source.into(),
            lines: lines.into(),
            extra: Map::new(),
        })
    }

    /// Build a literature item
    pub fn literature(source: impl Into<String>, reference_text: impl Into<String>) -> Self {
        Evidence::Literature(LiteratureEvidence {
            source: source.into(),
            reference_text: reference_text.into(),
            extra: Map::new(),
        })
    }

    /// Build a calculation item
    pub fn calculation(equations: impl Into<String>, program: impl Into<String>) -> Self {
        Evidence::Calculation(CalculationEvidence {
            equations: equations.into(),
            program: program.into(),
            extra: Map::new(),
        })
    }

    /// The kind of this item
    pub fn kind(&self) -> EvidenceKind {
        match self {
            Evidence::Simulation(_) => EvidenceKind::Simulation,
            Evidence::Literature(_) => EvidenceKind::Literature,
            Evidence::Calculation(_) => EvidenceKind::Calculation,
        }
    }

    /// Fields outside the variant's schema
    pub fn extra_fields(&self) -> &Map<String, Value> {
        match self {
            Evidence::Simulation(e) => &e.extra,
            Evidence::Literature(e) => &e.extra,
            Evidence::Calculation(e) => &e.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tagged_serialization() {
        let evidence = Evidence::simulation("sims/boil.py", "10-42");
        let value = serde_json::to_value(&evidence).unwrap();

        assert_eq!(
            value,
            json!({"type": "simulation", "source": "sims/boil.py", "lines": "10-42"})
        );
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let evidence: Evidence = serde_json::from_value(json!({
            "type": "literature",
            "source": "Smith 2020",
            "reference_text": "p. 12",
            "doi": "10.1000/xyz"
        }))
        .unwrap();

        assert_eq!(evidence.kind(), EvidenceKind::Literature);
        assert_eq!(evidence.extra_fields().len(), 1);
        assert!(evidence.extra_fields().contains_key("doi"));
        assert!(!evidence.extra_fields().contains_key("type"));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result: Result<Evidence, _> = serde_json::from_value(json!({
            "type": "calculation",
            "equations": "E = mc^2"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_schema() {
        assert_eq!(EvidenceKind::parse("calculation"), Some(EvidenceKind::Calculation));
        assert_eq!(EvidenceKind::parse("anecdote"), None);
        assert_eq!(EvidenceKind::Literature.required_fields(), &["source", "reference_text"]);
        for kind in EvidenceKind::ALL {
            assert_eq!(EvidenceKind::parse(kind.as_str()), Some(kind));
        }
    }
}
