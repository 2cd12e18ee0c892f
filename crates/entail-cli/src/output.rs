//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use entail_domain::{ClaimCost, ClaimId, CostReport, EpistemicCost, Hypergraph, ImplicationId, SnapshotInfo};
use entail_gatekeeper::ValidationReport;
use entail_janitor::PruneOutcome;
use entail_manager::{CostLine, SummaryView};
use colored::*;
use serde_json::json;
use std::collections::HashMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the document overview.
    pub fn format_summary(&self, summary: &SummaryView) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(summary)?);
        }

        let mut lines = vec![self.colorize(&summary.name, "cyan")];
        match &summary.root {
            Some(root) => lines.push(format!(
                "Root [{}] {}: total {}",
                root.id,
                root.text,
                cost_cell(root.cost.total)
            )),
            None => lines.push(self.error("Root claim is missing")),
        }
        lines.push(format!(
            "{} claim(s), {} implication(s)",
            summary.claim_count, summary.implication_count
        ));

        if summary.is_valid() {
            lines.push(self.success(&format!("Valid ({} warning(s))", summary.warning_count)));
        } else {
            lines.push(self.error(&format!(
                "{} error(s), {} warning(s)",
                summary.error_count, summary.warning_count
            )));
        }
        if !summary.unevaluated_leaves.is_empty() {
            lines.push(self.warning(&format!("Unevaluated leaves: {}", join_ids(&summary.unevaluated_leaves))));
        }
        if !summary.stale_implications.is_empty() {
            lines.push(self.warning(&format!(
                "Stale implications: {}",
                join_ids(&summary.stale_implications)
            )));
        }

        if !summary.branches.is_empty() {
            lines.push(String::new());
            lines.push(cost_table(&summary.branches));
        }
        Ok(lines.join("\n"))
    }

    /// Format a validation report.
    pub fn format_validation(&self, report: &ValidationReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            let value = json!({
                "valid": report.is_valid(),
                "errors": report.error_messages(),
                "warnings": report.warning_messages(),
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut lines = Vec::new();
        for message in report.error_messages() {
            lines.push(self.error(&message));
        }
        for message in report.warning_messages() {
            lines.push(self.warning(&message));
        }
        if report.is_valid() {
            lines.push(self.success(&format!("Document is valid ({} warning(s))", report.warnings.len())));
        } else {
            lines.push(self.error(&format!(
                "Document is invalid: {} error(s), {} warning(s)",
                report.errors.len(),
                report.warnings.len()
            )));
        }
        Ok(lines.join("\n"))
    }

    /// Format freshly computed costs, in document order.
    pub fn format_costs(
        &self,
        graph: &Hypergraph,
        costs: &HashMap<ClaimId, ClaimCost>,
        report: &CostReport,
    ) -> Result<String> {
        let rows: Vec<CostLine> = graph
            .claims
            .iter()
            .map(|claim| CostLine {
                id: claim.id.clone(),
                text: claim.text.clone(),
                cost: costs.get(&claim.id).copied().unwrap_or(ClaimCost::UNDEFINED),
            })
            .collect();

        if self.format == OutputFormat::Json {
            let value = json!({
                "claims": rows,
                "cycles": report.cycles,
                "ignored_implications": report.ignored_implications,
                "missing_premises": report.missing_premises,
                "evaluated": report.evaluated,
                "undefined": report.undefined,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut lines = vec![cost_table(&rows)];
        for cycle in &report.cycles {
            lines.push(self.error(&format!("Cycle: {}", join_ids(cycle))));
        }
        for id in &report.ignored_implications {
            lines.push(self.warning(&format!("Ignored implication {}: conclusion already supported", id)));
        }
        for (implication, premise) in &report.missing_premises {
            lines.push(self.warning(&format!("Implication {} references missing claim {}", implication, premise)));
        }
        lines.push(self.info(&format!(
            "{} evaluated, {} undefined",
            report.evaluated, report.undefined
        )));
        Ok(lines.join("\n"))
    }

    /// Format the snapshot history, oldest first.
    pub fn format_history(&self, history: &[SnapshotInfo]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(history)?);
        }
        if history.is_empty() {
            return Ok(self.colorize("No snapshots found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Snapshot", "Taken"]);
        for (index, info) in history.iter().enumerate() {
            builder.push_record([
                (index + 1).to_string(),
                info.id.to_string(),
                info.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            ]);
        }
        Ok(render(builder))
    }

    /// Format the result of a prune pass.
    pub fn format_prune(&self, outcome: &PruneOutcome) -> Result<String> {
        if self.format == OutputFormat::Json {
            let value = json!({
                "dry_run": outcome.dry_run,
                "removed_claims": outcome.removed_claims,
                "removed_implications": outcome.removed_implications,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        if outcome.is_noop() {
            return Ok(self.info("Nothing to prune"));
        }
        let verb = if outcome.dry_run { "Would remove" } else { "Removed" };
        let mut lines = vec![self.success(&format!(
            "{} {} claim(s) and {} implication(s)",
            verb,
            outcome.removed_claims.len(),
            outcome.removed_implications.len()
        ))];
        if !outcome.removed_claims.is_empty() {
            lines.push(format!("  claims: {}", join_ids(&outcome.removed_claims)));
        }
        if !outcome.removed_implications.is_empty() {
            lines.push(format!("  implications: {}", join_ids(&outcome.removed_implications)));
        }
        Ok(lines.join("\n"))
    }

    /// Format the implications awaiting an entailment check.
    pub fn format_stale(&self, graph: &Hypergraph, stale: &[ImplicationId]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(stale)?);
        }
        if stale.is_empty() {
            return Ok(self.success("All implications are checked"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Implication", "Type", "Premises", "Conclusion", "Status"]);
        for implication in stale.iter().filter_map(|id| graph.implication(id.as_str())) {
            builder.push_record([
                implication.id.to_string(),
                implication.implication_type.as_str().to_string(),
                join_ids(&implication.premises),
                implication.conclusion.to_string(),
                implication.entailment_status.as_str().to_string(),
            ]);
        }
        Ok(render(builder))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render one cost component for a table cell.
pub fn cost_cell(cost: Option<EpistemicCost>) -> String {
    match cost {
        Some(cost) => cost.to_string(),
        None => "undefined".to_string(),
    }
}

fn cost_table(rows: &[CostLine]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Claim", "Text", "Evidence", "Experimental", "Total"]);
    for row in rows {
        builder.push_record([
            row.id.to_string(),
            truncate(&row.text, 48),
            cost_cell(row.cost.evidence),
            cost_cell(row.cost.experimental),
            cost_cell(row.cost.total),
        ]);
    }
    render(builder)
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn join_ids<T: std::fmt::Display>(ids: &[T]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}
