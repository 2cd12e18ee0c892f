//! Document validation logic
//!
//! Checks run against the raw JSON value rather than the typed model, so a
//! document that would not even deserialize still gets a complete report.

use crate::{GatekeeperError, ValidationConfig};
use chrono::{DateTime, Utc};
use entail_domain::cost::INFINITY_SENTINEL;
use entail_domain::{CachedValidation, EntailmentStatus, EvidenceKind, Hypergraph, ImplicationType};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use tracing::debug;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The document is broken
    Error,
    /// The document is usable but suspicious
    Warning,
}

/// One problem found in a document
///
/// `location` strings read like `claim 'c1'` or `implications[2]` when the
/// entity has no usable id.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// The document is not a JSON object at all
    InvalidDocument(String),

    /// A required field is absent
    MissingField {
        /// Where
        location: String,
        /// Field name
        field: String,
    },

    /// A field has the wrong type or format
    InvalidField {
        /// Where
        location: String,
        /// Field name
        field: String,
        /// What was expected
        expected: &'static str,
    },

    /// Claim text is empty
    EmptyText(String),

    /// Claim score outside [0, 10]
    ScoreOutOfRange {
        /// Where
        location: String,
        /// Offending score
        score: f64,
    },

    /// Two claims share an id
    DuplicateClaimId(String),

    /// Two implications share an id
    DuplicateImplicationId(String),

    /// Evidence `type` is not a known variant
    UnknownEvidenceType {
        /// Where
        location: String,
        /// Tag found
        found: String,
    },

    /// Evidence lacks a field its variant requires
    MissingEvidenceField {
        /// Where
        location: String,
        /// Evidence variant
        kind: EvidenceKind,
        /// Missing field
        field: &'static str,
    },

    /// Evidence carries a field outside its variant's schema
    UnknownEvidenceField {
        /// Where
        location: String,
        /// Evidence variant
        kind: EvidenceKind,
        /// Unrecognized field
        field: String,
    },

    /// Implication `type` is not AND or OR
    InvalidImplicationType {
        /// Where
        location: String,
        /// Value found
        found: String,
    },

    /// Implication has no premises
    EmptyPremises(String),

    /// The same premise is listed more than once
    DuplicatePremise {
        /// Implication id
        implication: String,
        /// Repeated premise
        premise: String,
    },

    /// A premise references no claim
    UnknownPremise {
        /// Implication id
        implication: String,
        /// Dangling premise id
        premise: String,
    },

    /// The conclusion references no claim
    UnknownConclusion {
        /// Implication id
        implication: String,
        /// Dangling conclusion id
        conclusion: String,
    },

    /// The root claim is absent
    MissingRoot(String),

    /// More than one implication concludes the same claim
    MultipleSupports {
        /// Conclusion claim id
        claim: String,
        /// Implications concluding it, in document order
        implications: Vec<String>,
    },

    /// Claims that are, transitively, their own premises
    Cycle(Vec<String>),

    /// Claim has no premise chain to the root
    UnreachableClaim(String),

    /// Claim has not been scored yet
    UnscoredClaim(String),
}

impl ValidationIssue {
    /// Whether this issue is an error or a warning
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::UnknownEvidenceField { .. }
            | ValidationIssue::DuplicatePremise { .. }
            | ValidationIssue::MultipleSupports { .. }
            | ValidationIssue::UnreachableClaim(_)
            | ValidationIssue::UnscoredClaim(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::InvalidDocument(msg) => write!(f, "Invalid document: {}", msg),
            ValidationIssue::MissingField { location, field } => {
                write!(f, "{}: missing required field '{}'", location, field)
            }
            ValidationIssue::InvalidField { location, field, expected } => {
                write!(f, "{}: field '{}' must be {}", location, field, expected)
            }
            ValidationIssue::EmptyText(location) => write!(f, "{}: text must not be empty", location),
            ValidationIssue::ScoreOutOfRange { location, score } => {
                write!(f, "{}: score {} is outside [0, 10]", location, score)
            }
            ValidationIssue::DuplicateClaimId(id) => write!(f, "Duplicate claim id '{}'", id),
            ValidationIssue::DuplicateImplicationId(id) => {
                write!(f, "Duplicate implication id '{}'", id)
            }
            ValidationIssue::UnknownEvidenceType { location, found } => {
                write!(f, "{}: unknown evidence type '{}'", location, found)
            }
            ValidationIssue::MissingEvidenceField { location, kind, field } => write!(
                f,
                "{}: {} evidence is missing required field '{}'",
                location,
                kind.as_str(),
                field
            ),
            ValidationIssue::UnknownEvidenceField { location, kind, field } => write!(
                f,
                "{}: unrecognized field '{}' in {} evidence",
                location,
                field,
                kind.as_str()
            ),
            ValidationIssue::InvalidImplicationType { location, found } => {
                write!(f, "{}: type must be AND or OR, got '{}'", location, found)
            }
            ValidationIssue::EmptyPremises(location) => {
                write!(f, "{}: premises must not be empty", location)
            }
            ValidationIssue::DuplicatePremise { implication, premise } => write!(
                f,
                "Implication '{}' lists premise '{}' more than once",
                implication, premise
            ),
            ValidationIssue::UnknownPremise { implication, premise } => write!(
                f,
                "Implication '{}' references unknown premise '{}'",
                implication, premise
            ),
            ValidationIssue::UnknownConclusion { implication, conclusion } => write!(
                f,
                "Implication '{}' references unknown conclusion '{}'",
                implication, conclusion
            ),
            ValidationIssue::MissingRoot(id) => write!(f, "Root claim '{}' is missing", id),
            ValidationIssue::MultipleSupports { claim, implications } => write!(
                f,
                "Claim '{}' is the conclusion of several implications ({}); only '{}' is used for cost",
                claim,
                implications.join(", "),
                implications.first().map(String::as_str).unwrap_or_default()
            ),
            ValidationIssue::Cycle(claims) => {
                write!(f, "Cycle in implications through claims: {}", claims.join(" -> "))
            }
            ValidationIssue::UnreachableClaim(id) => {
                write!(f, "Claim '{}' does not contribute to the root", id)
            }
            ValidationIssue::UnscoredClaim(id) => write!(f, "Claim '{}' has no score yet", id),
        }
    }
}

/// Every issue found in one document, split by severity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Hard errors
    pub errors: Vec<ValidationIssue>,
    /// Non-fatal warnings
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether no errors were found (warnings are allowed)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an issue under its severity
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity() {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    /// Error messages
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Warning messages
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Form embedded in document metadata on save
    pub fn to_cached(&self, validated_at: DateTime<Utc>) -> CachedValidation {
        CachedValidation {
            errors: self.error_messages(),
            warnings: self.warning_messages(),
            validated_at,
        }
    }
}

/// Structure of one implication gathered during the first pass
struct Edge<'a> {
    id: &'a str,
    premises: Vec<&'a str>,
    conclusion: Option<&'a str>,
}

/// The Gatekeeper validates hypergraph documents
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a typed document
    pub fn validate(&self, graph: &Hypergraph) -> ValidationReport {
        match graph.to_value() {
            Ok(value) => self.validate_value(&value),
            Err(e) => {
                let mut report = ValidationReport::default();
                report.push(ValidationIssue::InvalidDocument(e.to_string()));
                report
            }
        }
    }

    /// Validate a raw JSON document
    ///
    /// References are resolved only after every claim id has been collected,
    /// so declaration order never matters.
    pub fn validate_value(&self, doc: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();

        let Some(root) = doc.as_object() else {
            report.push(ValidationIssue::InvalidDocument(
                "document must be a JSON object".to_string(),
            ));
            return report;
        };

        match root.get("metadata") {
            None => report.push(missing("document", "metadata")),
            Some(Value::Object(metadata)) => check_metadata(metadata, &mut report),
            Some(_) => report.push(invalid("document", "metadata", "an object")),
        }

        let claims = array_field(root, "document", "claims", &mut report);
        let implications = array_field(root, "document", "implications", &mut report);

        // Pass 1: claims
        let mut claim_ids: Vec<&str> = Vec::with_capacity(claims.len());
        let mut known: HashSet<&str> = HashSet::with_capacity(claims.len());
        for (index, claim) in claims.iter().enumerate() {
            if let Some(id) = self.check_claim(index, claim, &mut report) {
                if known.insert(id) {
                    claim_ids.push(id);
                } else {
                    report.push(ValidationIssue::DuplicateClaimId(id.to_string()));
                }
            }
        }

        // Pass 2: implication structure
        let mut edges: Vec<Edge<'_>> = Vec::with_capacity(implications.len());
        let mut implication_ids: HashSet<&str> = HashSet::new();
        for (index, implication) in implications.iter().enumerate() {
            if let Some(edge) = check_implication(index, implication, &mut report) {
                if !implication_ids.insert(edge.id) {
                    report.push(ValidationIssue::DuplicateImplicationId(edge.id.to_string()));
                }
                edges.push(edge);
            }
        }

        // Pass 3: references, now that every claim id is known
        for edge in &edges {
            for premise in &edge.premises {
                if !known.contains(premise) {
                    report.push(ValidationIssue::UnknownPremise {
                        implication: edge.id.to_string(),
                        premise: premise.to_string(),
                    });
                }
            }
            if let Some(conclusion) = edge.conclusion {
                if !known.contains(conclusion) {
                    report.push(ValidationIssue::UnknownConclusion {
                        implication: edge.id.to_string(),
                        conclusion: conclusion.to_string(),
                    });
                }
            }
        }

        let root_id = self.config.root_claim_id.as_str();
        if !known.contains(root_id) {
            report.push(ValidationIssue::MissingRoot(root_id.to_string()));
        }

        if self.config.warn_multiple_supports {
            check_multiple_supports(&edges, &mut report);
        }

        let premises_of = premises_by_conclusion(&edges);

        if self.config.check_cycles {
            for cycle in find_cycles(&claim_ids, &premises_of) {
                report.push(ValidationIssue::Cycle(cycle));
            }
        }

        if self.config.warn_unreachable_claims && known.contains(root_id) {
            let needed = reachable_from(root_id, &premises_of);
            for id in &claim_ids {
                if !needed.contains(id) {
                    report.push(ValidationIssue::UnreachableClaim(id.to_string()));
                }
            }
        }

        debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            claims = claims.len(),
            implications = implications.len(),
            "Validated document"
        );

        report
    }

    /// Refuse to delete the root claim
    pub fn ensure_deletable(&self, claim_id: &str) -> Result<(), GatekeeperError> {
        if claim_id == self.config.root_claim_id {
            return Err(GatekeeperError::RootDeletion(claim_id.to_string()));
        }
        Ok(())
    }

    /// Check one claim, returning its id when it has a usable one
    fn check_claim<'a>(
        &self,
        index: usize,
        value: &'a Value,
        report: &mut ValidationReport,
    ) -> Option<&'a str> {
        let fallback = format!("claims[{}]", index);
        let Some(obj) = value.as_object() else {
            report.push(invalid(&fallback, "claim", "an object"));
            return None;
        };

        let id = require_id(obj, &fallback, report);
        let location = id.map_or(fallback, |id| format!("claim '{}'", id));

        if let Some(text) = require_str(obj, &location, "text", report) {
            if text.trim().is_empty() {
                report.push(ValidationIssue::EmptyText(location.clone()));
            }
        }

        match obj.get("score") {
            None | Some(Value::Null) => {
                if self.config.warn_unscored_claims {
                    if let Some(id) = id {
                        report.push(ValidationIssue::UnscoredClaim(id.to_string()));
                    }
                }
            }
            Some(v) => match v.as_f64() {
                Some(score) if (0.0..=10.0).contains(&score) => {}
                Some(score) => report.push(ValidationIssue::ScoreOutOfRange {
                    location: location.clone(),
                    score,
                }),
                None => report.push(invalid(&location, "score", "a number in [0, 10]")),
            },
        }

        match obj.get("testability") {
            None | Some(Value::Null) => {}
            Some(v) if matches!(v.as_u64(), Some(0) | Some(1)) => {}
            Some(_) => report.push(invalid(&location, "testability", "0 or 1")),
        }

        optional_str(obj, &location, "reasoning", report);
        string_list(obj, &location, "uncertainties", report);
        string_list(obj, &location, "tags", report);
        optional_timestamp(obj, &location, "created_at", report);
        optional_timestamp(obj, &location, "modified_at", report);

        for field in ["evidence_epistemic_cost", "experimental_epistemic_cost", "cost"] {
            check_cost(obj, &location, field, report);
        }

        match obj.get("evidence") {
            None => {}
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    self.check_evidence(&format!("{} evidence[{}]", location, i), item, report);
                }
            }
            Some(_) => report.push(invalid(&location, "evidence", "an array")),
        }

        id
    }

    fn check_evidence(&self, location: &str, value: &Value, report: &mut ValidationReport) {
        let Some(obj) = value.as_object() else {
            report.push(invalid(location, "evidence", "an object"));
            return;
        };

        let kind = match obj.get("type") {
            None => {
                report.push(missing(location, "type"));
                return;
            }
            Some(Value::String(tag)) => match EvidenceKind::parse(tag) {
                Some(kind) => kind,
                None => {
                    report.push(ValidationIssue::UnknownEvidenceType {
                        location: location.to_string(),
                        found: tag.clone(),
                    });
                    return;
                }
            },
            Some(_) => {
                report.push(invalid(location, "type", "a string"));
                return;
            }
        };

        let required = kind.required_fields();
        for field in required {
            match obj.get(*field) {
                None | Some(Value::Null) => report.push(ValidationIssue::MissingEvidenceField {
                    location: location.to_string(),
                    kind,
                    field: *field,
                }),
                Some(Value::String(_)) => {}
                Some(_) => report.push(invalid(location, field, "a string")),
            }
        }

        if self.config.warn_unknown_evidence_fields {
            for key in obj.keys() {
                if key != "type" && !required.iter().any(|f| *f == key.as_str()) {
                    report.push(ValidationIssue::UnknownEvidenceField {
                        location: location.to_string(),
                        kind,
                        field: key.clone(),
                    });
                }
            }
        }
    }
}

impl Default for Gatekeeper {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Validate a document with the default configuration
pub fn validate(graph: &Hypergraph) -> ValidationReport {
    Gatekeeper::default_config().validate(graph)
}

fn check_metadata(metadata: &Map<String, Value>, report: &mut ValidationReport) {
    let location = "metadata";
    require_str(metadata, location, "name", report);
    optional_str(metadata, location, "description", report);
    optional_str(metadata, location, "version", report);

    for field in ["created", "last_updated"] {
        match metadata.get(field) {
            None => report.push(missing(location, field)),
            Some(v) if is_timestamp(v) => {}
            Some(_) => report.push(invalid(location, field, "an RFC 3339 timestamp")),
        }
    }

    match metadata.get("cached_validation") {
        None | Some(Value::Null) | Some(Value::Object(_)) => {}
        Some(_) => report.push(invalid(location, "cached_validation", "an object or null")),
    }
}

fn check_implication<'a>(
    index: usize,
    value: &'a Value,
    report: &mut ValidationReport,
) -> Option<Edge<'a>> {
    let fallback = format!("implications[{}]", index);
    let Some(obj) = value.as_object() else {
        report.push(invalid(&fallback, "implication", "an object"));
        return None;
    };

    let id = require_id(obj, &fallback, report);
    let location = id.map_or(fallback, |id| format!("implication '{}'", id));

    let mut premises = Vec::new();
    match obj.get("premises") {
        None => report.push(missing(&location, "premises")),
        Some(Value::Array(items)) if items.is_empty() => {
            report.push(ValidationIssue::EmptyPremises(location.clone()))
        }
        Some(Value::Array(items)) => {
            for item in items {
                match item.as_str() {
                    Some(premise) if premises.contains(&premise) => {
                        report.push(ValidationIssue::DuplicatePremise {
                            implication: id.unwrap_or(location.as_str()).to_string(),
                            premise: premise.to_string(),
                        })
                    }
                    Some(premise) => premises.push(premise),
                    None => report.push(invalid(&location, "premises", "an array of claim ids")),
                }
            }
        }
        Some(_) => report.push(invalid(&location, "premises", "an array of claim ids")),
    }

    let conclusion = require_str(obj, &location, "conclusion", report);

    match obj.get("type") {
        None => report.push(missing(&location, "type")),
        Some(Value::String(t)) if ImplicationType::parse(t).is_some() => {}
        Some(other) => report.push(ValidationIssue::InvalidImplicationType {
            location: location.clone(),
            found: other.as_str().map_or_else(|| other.to_string(), str::to_string),
        }),
    }

    match obj.get("entailment_status") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if EntailmentStatus::parse(s).is_some() => {}
        Some(_) => report.push(invalid(
            &location,
            "entailment_status",
            "one of unset, passed, failed",
        )),
    }

    optional_str(obj, &location, "reasoning", report);
    optional_timestamp(obj, &location, "last_checked", report);
    match obj.get("entailment_explanation") {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => report.push(invalid(&location, "entailment_explanation", "a string or null")),
    }

    Some(Edge {
        id: id?,
        premises,
        conclusion,
    })
}

fn check_multiple_supports(edges: &[Edge<'_>], report: &mut ValidationReport) {
    let mut supports: Vec<(&str, Vec<String>)> = Vec::new();
    for edge in edges {
        let Some(conclusion) = edge.conclusion else {
            continue;
        };
        match supports.iter_mut().find(|(c, _)| *c == conclusion) {
            Some((_, ids)) => ids.push(edge.id.to_string()),
            None => supports.push((conclusion, vec![edge.id.to_string()])),
        }
    }

    for (claim, implications) in supports {
        if implications.len() > 1 {
            report.push(ValidationIssue::MultipleSupports {
                claim: claim.to_string(),
                implications,
            });
        }
    }
}

fn premises_by_conclusion<'a>(edges: &[Edge<'a>]) -> HashMap<&'a str, Vec<&'a str>> {
    let mut map: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        if let Some(conclusion) = edge.conclusion {
            map.entry(conclusion).or_default().extend(edge.premises.iter().copied());
        }
    }
    map
}

/// Claims reachable from `root` following conclusion -> premise edges only
fn reachable_from<'a>(root: &'a str, premises_of: &HashMap<&'a str, Vec<&'a str>>) -> HashSet<&'a str> {
    let mut needed = HashSet::new();
    let mut queue = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        if !needed.insert(current) {
            continue;
        }
        if let Some(premises) = premises_of.get(current) {
            queue.extend(premises.iter().copied());
        }
    }
    needed
}

/// Distinct cycles in the conclusion -> premises relation
///
/// Iterative three-colour depth-first search; each back edge yields the path
/// slice that closes it. Cycles are reported once per member set, in the
/// order they are first met.
fn find_cycles(claim_ids: &[&str], premises_of: &HashMap<&str, Vec<&str>>) -> Vec<Vec<String>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Colour {
        White,
        Grey,
        Black,
    }

    let mut colour: HashMap<&str, Colour> = claim_ids.iter().map(|id| (*id, Colour::White)).collect();
    let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
    let mut cycles = Vec::new();
    let empty: Vec<&str> = Vec::new();

    for &start in claim_ids {
        if colour.get(start) != Some(&Colour::White) {
            continue;
        }

        let mut path: Vec<&str> = vec![start];
        let mut frames: Vec<(&str, usize)> = vec![(start, 0)];
        colour.insert(start, Colour::Grey);

        while let Some(&(node, next)) = frames.last() {
            let premises = premises_of.get(node).unwrap_or(&empty);
            if next >= premises.len() {
                frames.pop();
                path.pop();
                colour.insert(node, Colour::Black);
                continue;
            }
            if let Some(frame) = frames.last_mut() {
                frame.1 += 1;
            }

            let premise = premises[next];
            match colour.get(premise).copied() {
                // Dangling references are reported elsewhere
                None | Some(Colour::Black) => {}
                Some(Colour::Grey) => {
                    let from = path.iter().position(|p| *p == premise).unwrap_or(0);
                    let members: Vec<&str> = path[from..].to_vec();
                    if seen.insert(members.iter().copied().collect()) {
                        let mut cycle: Vec<String> = members.iter().map(|s| s.to_string()).collect();
                        cycle.push(premise.to_string());
                        cycles.push(cycle);
                    }
                }
                Some(Colour::White) => {
                    colour.insert(premise, Colour::Grey);
                    path.push(premise);
                    frames.push((premise, 0));
                }
            }
        }
    }

    cycles
}

fn missing(location: &str, field: &str) -> ValidationIssue {
    ValidationIssue::MissingField {
        location: location.to_string(),
        field: field.to_string(),
    }
}

fn invalid(location: &str, field: &str, expected: &'static str) -> ValidationIssue {
    ValidationIssue::InvalidField {
        location: location.to_string(),
        field: field.to_string(),
        expected,
    }
}

fn is_timestamp(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok())
}

fn array_field<'a>(
    obj: &'a Map<String, Value>,
    location: &str,
    field: &str,
    report: &mut ValidationReport,
) -> &'a [Value] {
    match obj.get(field) {
        None => &[],
        Some(Value::Array(items)) => items,
        Some(_) => {
            report.push(invalid(location, field, "an array"));
            &[]
        }
    }
}

fn require_id<'a>(
    obj: &'a Map<String, Value>,
    location: &str,
    report: &mut ValidationReport,
) -> Option<&'a str> {
    match require_str(obj, location, "id", report) {
        Some("") => {
            report.push(invalid(location, "id", "a non-empty string"));
            None
        }
        other => other,
    }
}

fn require_str<'a>(
    obj: &'a Map<String, Value>,
    location: &str,
    field: &str,
    report: &mut ValidationReport,
) -> Option<&'a str> {
    match obj.get(field) {
        None => {
            report.push(missing(location, field));
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            report.push(invalid(location, field, "a string"));
            None
        }
    }
}

fn optional_str(obj: &Map<String, Value>, location: &str, field: &str, report: &mut ValidationReport) {
    match obj.get(field) {
        None | Some(Value::String(_)) => {}
        Some(_) => report.push(invalid(location, field, "a string")),
    }
}

fn optional_timestamp(
    obj: &Map<String, Value>,
    location: &str,
    field: &str,
    report: &mut ValidationReport,
) {
    match obj.get(field) {
        None | Some(Value::Null) => {}
        Some(v) if is_timestamp(v) => {}
        Some(_) => report.push(invalid(location, field, "an RFC 3339 timestamp")),
    }
}

fn string_list(obj: &Map<String, Value>, location: &str, field: &str, report: &mut ValidationReport) {
    match obj.get(field) {
        None => {}
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => {}
        Some(_) => report.push(invalid(location, field, "an array of strings")),
    }
}

fn check_cost(obj: &Map<String, Value>, location: &str, field: &str, report: &mut ValidationReport) {
    match obj.get(field) {
        None | Some(Value::Null) => {}
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v >= 0.0) => {}
        Some(Value::String(s)) if s == INFINITY_SENTINEL => {}
        Some(_) => report.push(invalid(
            location,
            field,
            "a non-negative number, \"Infinity\" or null",
        )),
    }
}
