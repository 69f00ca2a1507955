//! Text and JSON rendering of suite reports and snapshot runs

use crate::runner::{CheckResult, SuiteReport};
use crate::snapshot::{BaselineDrift, BaselineEntry, SnapshotComparison, SnapshotRecord};
use serde::Serialize;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Bordered header, one line per check, and the tally
pub fn render_suite_text(report: &SuiteReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule());
    out.push('\n');
    out.push_str(&report.title);
    out.push('\n');
    out.push_str(&rule());
    out.push('\n');

    for check in &report.checks {
        match check.message() {
            None => out.push_str(&format!("[PASS]: {}\n", check.label)),
            Some(reason) => out.push_str(&format!("[FAIL]: {} - {}\n", check.label, reason)),
        }
    }

    out.push_str(&format!(
        "\n{}: {}/{} passed\n",
        report.tally,
        report.passed(),
        report.total()
    ));
    out.push_str(&rule());
    out.push('\n');
    out
}

/// Machine-readable suite summary
#[derive(Debug, Serialize)]
pub struct JsonSuite<'a> {
    pub suite: &'a str,
    pub passed: usize,
    pub total: usize,
    pub checks: &'a [CheckResult],
}

impl<'a> From<&'a SuiteReport> for JsonSuite<'a> {
    fn from(report: &'a SuiteReport) -> Self {
        Self {
            suite: &report.tally,
            passed: report.passed(),
            total: report.total(),
            checks: &report.checks,
        }
    }
}

/// All suite reports as a pretty JSON array
pub fn render_suites_json(reports: &[SuiteReport]) -> serde_json::Result<String> {
    let suites: Vec<JsonSuite> = reports.iter().map(JsonSuite::from).collect();
    serde_json::to_string_pretty(&suites)
}

/// `[CREATED]` / `[SKIP]` lines for a baseline capture
pub fn render_baseline_text(entries: &[BaselineEntry]) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule());
    out.push_str("\nCREATING BASELINE SNAPSHOTS\n");
    out.push_str(&rule());
    out.push('\n');
    for entry in entries {
        match entry {
            BaselineEntry::Created { name, .. } => out.push_str(&format!("[CREATED]: {name}\n")),
            BaselineEntry::Skipped { relative, .. } => {
                out.push_str(&format!("[SKIP]: {relative} (file not found)\n"))
            }
        }
    }
    out
}

/// Records written by a baseline capture as a pretty JSON array; skipped targets are left out
pub fn render_baseline_json(entries: &[BaselineEntry]) -> serde_json::Result<String> {
    let records: Vec<&SnapshotRecord> = entries
        .iter()
        .filter_map(|entry| match entry {
            BaselineEntry::Created { record, .. } => Some(record),
            BaselineEntry::Skipped { .. } => None,
        })
        .collect();
    serde_json::to_string_pretty(&records)
}

/// One line per baseline target plus a tally of clean files
pub fn render_drift_text(drifts: &[BaselineDrift]) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule());
    out.push_str("\nCOMPARING WITH BASELINE SNAPSHOTS\n");
    out.push_str(&rule());
    out.push('\n');
    for drift in drifts {
        let line = match &drift.comparison {
            Some(SnapshotComparison::Unchanged { .. }) => format!("[UNCHANGED]: {}", drift.name),
            Some(SnapshotComparison::Changed { baseline, current }) => format!(
                "[CHANGED]: {} ({} -> {})",
                drift.name,
                short_digest(baseline),
                short_digest(current)
            ),
            Some(SnapshotComparison::NoBaseline) => format!("[NO BASELINE]: {}", drift.name),
            None => format!("[MISSING]: {} (file not found)", drift.relative),
        };
        out.push_str(&line);
        out.push('\n');
    }
    let clean = drifts.iter().filter(|d| d.is_clean()).count();
    out.push_str(&format!("\nSnapshots: {}/{} unchanged\n", clean, drifts.len()));
    out.push_str(&rule());
    out.push('\n');
    out
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

/// Machine-readable drift entry
#[derive(Debug, Serialize)]
pub struct JsonDrift<'a> {
    pub name: &'a str,
    pub file: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<&'a str>,
}

impl<'a> From<&'a BaselineDrift> for JsonDrift<'a> {
    fn from(drift: &'a BaselineDrift) -> Self {
        let (status, baseline, current) = match &drift.comparison {
            Some(SnapshotComparison::Unchanged { digest }) => {
                ("unchanged", Some(digest.as_str()), Some(digest.as_str()))
            }
            Some(SnapshotComparison::Changed { baseline, current }) => {
                ("changed", Some(baseline.as_str()), Some(current.as_str()))
            }
            Some(SnapshotComparison::NoBaseline) => ("no_baseline", None, None),
            None => ("missing", None, None),
        };
        Self {
            name: drift.name,
            file: drift.relative,
            status,
            baseline,
            current,
        }
    }
}

/// Baseline comparison as a pretty JSON array
pub fn render_drift_json(drifts: &[BaselineDrift]) -> serde_json::Result<String> {
    let entries: Vec<JsonDrift> = drifts.iter().map(JsonDrift::from).collect();
    serde_json::to_string_pretty(&entries)
}
