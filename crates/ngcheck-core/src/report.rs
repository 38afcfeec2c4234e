//! Human-readable and JSON reports.
//!
//! The text layouts are fixed: field order, `YES`/`NO` for UV presence and a
//! one-decimal percentage for the flip ratio.

use serde::{Deserialize, Serialize};

use crate::analyze::AnalysisResult;
use crate::batch::{BatchEntry, BatchSummary};
use crate::checks::{triggered_checks, verdict, Check, CheckConfig, Verdict};
use crate::select::{ng_object_selection, ObjectSelection};

/// Title line of the full report.
pub const REPORT_TITLE: &str = "=== Mesh NG Checker Report ===";

/// Reason text when nothing fired.
pub const NO_ISSUES: &str = "No issues";

/// Formats a ratio in `[0, 1]` as a percentage with one decimal.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Multi-line block describing one analyzed object.
pub fn format_block(name: &str, result: &AnalysisResult) -> String {
    format!(
        "Object: {}\n\
         Faces: {}\n\
         N-gons: {}\n\
         Non-manifold edges: {}\n\
         Boundary edges: {}\n\
         UV: {}\n\
         Flipped suspect (heuristic): {} ({})\n",
        name,
        result.faces,
        result.ngon,
        result.nm,
        result.bd,
        if result.uv { "YES" } else { "NO" },
        result.flip,
        format_percent(result.flip_ratio()),
    )
}

/// Comma-separated labels of the enabled checks that fired, or `No issues`.
pub fn format_reason(result: &AnalysisResult, config: &CheckConfig) -> String {
    reason_from_checks(&triggered_checks(result, config))
}

fn reason_from_checks(checks: &[Check]) -> String {
    if checks.is_empty() {
        return NO_ISSUES.to_string();
    }
    checks
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary of an analyzed object.
pub fn format_summary(name: &str, verdict: Verdict, result: &AnalysisResult) -> String {
    format!(
        "{} | {} | NGon:{} NM:{} BD:{} UV:{}",
        verdict.tag(),
        name,
        result.ngon,
        result.nm,
        result.bd,
        if result.uv { "Y" } else { "N" }
    )
}

/// Status of one report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    Ok,
    Ng,
    Error,
}

impl EntryStatus {
    /// Tag used in reports.
    pub fn tag(self) -> &'static str {
        match self {
            EntryStatus::Ok => "OK",
            EntryStatus::Ng => "NG",
            EntryStatus::Error => "ERROR",
        }
    }
}

impl From<Verdict> for EntryStatus {
    fn from(v: Verdict) -> Self {
        match v {
            Verdict::Ok => EntryStatus::Ok,
            Verdict::Ng => EntryStatus::Ng,
        }
    }
}

/// One object in a batch report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub status: EntryStatus,
    /// Checks that fired; empty for OK and ERROR entries.
    pub triggered: Vec<Check>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportEntry {
    fn from_batch(entry: &BatchEntry, config: &CheckConfig) -> Self {
        match &entry.outcome {
            Ok(result) => {
                let triggered = triggered_checks(result, config);
                Self {
                    name: entry.name.clone(),
                    status: verdict(result, config).into(),
                    reason: Some(reason_from_checks(&triggered)),
                    triggered,
                    flip_ratio: Some(result.flip_ratio()),
                    result: Some(result.clone()),
                    error: None,
                }
            }
            Err(e) => Self {
                name: entry.name.clone(),
                status: EntryStatus::Error,
                triggered: Vec::new(),
                reason: None,
                flip_ratio: None,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// The text block, or `<name> : ERROR`.
    pub fn block(&self) -> String {
        match &self.result {
            Some(result) => format_block(&self.name, result),
            None => format!("{} : ERROR", self.name),
        }
    }

    /// The summary line, or `ERROR | <name>`.
    pub fn summary_line(&self) -> String {
        match (&self.result, self.status) {
            (Some(result), EntryStatus::Ng) => format_summary(&self.name, Verdict::Ng, result),
            (Some(result), _) => format_summary(&self.name, Verdict::Ok, result),
            (None, _) => format!("ERROR | {}", self.name),
        }
    }
}

/// Classified and formatted results of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub config: CheckConfig,
    pub entries: Vec<ReportEntry>,
    pub summary: BatchSummary,
    pub selection: ObjectSelection,
}

impl BatchReport {
    /// Classifies every entry under `config`.
    pub fn build(entries: &[BatchEntry], config: &CheckConfig) -> Self {
        let report_entries: Vec<ReportEntry> = entries
            .iter()
            .map(|e| ReportEntry::from_batch(e, config))
            .collect();

        let mut summary = BatchSummary {
            total: report_entries.len(),
            ..Default::default()
        };
        for entry in &report_entries {
            match entry.status {
                EntryStatus::Ok => summary.ok += 1,
                EntryStatus::Ng => summary.ng += 1,
                EntryStatus::Error => summary.errors += 1,
            }
        }

        Self {
            config: config.clone(),
            entries: report_entries,
            summary,
            selection: ng_object_selection(entries, config),
        }
    }

    /// The full text report.
    pub fn full_text(&self) -> String {
        let mut lines: Vec<String> = vec![format!("{}\n", REPORT_TITLE)];
        for entry in &self.entries {
            match &entry.result {
                Some(result) => {
                    lines.push(format!("--- {} | {} ---", entry.status.tag(), entry.name));
                    lines.push(format!(
                        "Reason: {}",
                        entry.reason.as_deref().unwrap_or(NO_ISSUES)
                    ));
                    lines.push(format_block(&entry.name, result));
                    lines.push(String::new());
                }
                None => lines.push(format!("--- ERROR | {} ---\n", entry.name)),
            }
        }
        lines.join("\n")
    }

    /// Blocks of every entry separated by a blank line.
    pub fn last_result_text(&self) -> String {
        self.entries
            .iter()
            .map(ReportEntry::block)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Summary lines with NG entries first, joined by ` || `.
    pub fn status_line(&self) -> String {
        let mut lines: Vec<(bool, String)> = self
            .entries
            .iter()
            .map(|e| (e.status != EntryStatus::Ng, e.summary_line()))
            .collect();
        lines.sort_by_key(|(not_ng, _)| *not_ng);
        lines
            .into_iter()
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join(" || ")
    }
}
