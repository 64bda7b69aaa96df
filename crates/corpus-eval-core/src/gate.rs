//! Baseline regression gate.
//!
//! Compares a freshly computed metrics report against a baseline of minimum
//! acceptable values. Every baseline key yields one [`GateRow`]; the gate
//! fails when any row fails. Metrics without a baseline entry are ignored.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{EvalError, Result};
use crate::flatten::flatten_metrics;
use crate::obs;

// ---------------------------------------------------------------------------
// Rows and verdict
// ---------------------------------------------------------------------------

/// Outcome of comparing one baseline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// `actual >= baseline`.
    Pass,
    /// `actual < baseline`.
    Fail,
    /// No value (or `null`) in the metrics report.
    Missing,
    /// Baseline or actual value could not be read as a number.
    NotNumeric,
}

impl RowStatus {
    pub fn passed(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// One line of the regression report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateRow {
    pub metric: String,
    pub baseline: Value,
    pub actual: Option<Value>,
    /// `actual - baseline`, present only when both values are numeric.
    pub delta: Option<f64>,
    pub status: RowStatus,
}

/// Result of running the gate over a baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GateVerdict {
    pub rows: Vec<GateRow>,
}

impl GateVerdict {
    /// Whether every baseline entry passed.
    pub fn passed(&self) -> bool {
        self.rows.iter().all(|r| r.status.passed())
    }

    pub fn failed_rows(&self) -> impl Iterator<Item = &GateRow> {
        self.rows.iter().filter(|r| !r.status.passed())
    }

    /// Process exit code: 0 on pass, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Lenient numeric coercion: numbers, booleans and numeric strings.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn compare(metric: &str, baseline: &Value, actual: Option<&Value>) -> GateRow {
    let actual = actual.filter(|v| !v.is_null());
    let Some(actual) = actual else {
        return GateRow {
            metric: metric.to_string(),
            baseline: baseline.clone(),
            actual: None,
            delta: None,
            status: RowStatus::Missing,
        };
    };

    let (delta, status) = match (coerce_number(actual), coerce_number(baseline)) {
        (Some(a), Some(b)) => {
            let status = if a >= b {
                RowStatus::Pass
            } else {
                RowStatus::Fail
            };
            (Some(a - b), status)
        }
        _ => (None, RowStatus::NotNumeric),
    };

    GateRow {
        metric: metric.to_string(),
        baseline: baseline.clone(),
        actual: Some(actual.clone()),
        delta,
        status,
    }
}

/// Compare every baseline entry, in baseline order, against `metrics`.
///
/// `metrics` may be nested; it is flattened into dotted keys first.
pub fn evaluate_baseline(baseline: &Map<String, Value>, metrics: &Value) -> GateVerdict {
    let flat = flatten_metrics(metrics);
    let rows = baseline
        .iter()
        .map(|(metric, min)| compare(metric, min, flat.get(metric)))
        .collect();
    GateVerdict { rows }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const PASS_MARK: &str = "✅";
const FAIL_MARK: &str = "❌";

/// Float rendering that keeps a trailing `.0` on integral values.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn format_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_row(row: &GateRow) -> String {
    let baseline = format_raw(&row.baseline);
    let (actual, delta) = match (&row.actual, row.status) {
        (None, _) => ("—".to_string(), "MISSING".to_string()),
        (Some(raw), RowStatus::NotNumeric) => (format_raw(raw), "N/A".to_string()),
        (Some(raw), _) => {
            let actual = coerce_number(raw).map_or_else(|| format_raw(raw), format_float);
            let delta = row.delta.map_or_else(|| "N/A".to_string(), |d| format!("{d:+.3}"));
            (actual, delta)
        }
    };
    let mark = if row.status.passed() {
        PASS_MARK
    } else {
        FAIL_MARK
    };
    format!(
        "| `{}` | {} | {} | {} | {} |",
        row.metric, baseline, actual, delta, mark
    )
}

/// Render the verdict as a Markdown table.
pub fn render_markdown(verdict: &GateVerdict) -> String {
    let mut md = String::from("# Metrics regression report\n\n");
    md.push_str("| metric | baseline | actual | Δ | pass |\n");
    md.push_str("|---|---:|---:|---:|:---:|\n");
    for row in &verdict.rows {
        let _ = writeln!(md, "{}", render_row(row));
    }
    md
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Read a required JSON document.
pub fn read_json(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(EvalError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read a required JSON document whose top level must be an object.
pub fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    match read_json(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(EvalError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Load both inputs, compare, and write the Markdown report.
///
/// Missing or unreadable inputs abort before any report is written.
pub fn run_gate(
    baseline_path: &Path,
    metrics_path: &Path,
    report_path: &Path,
) -> Result<GateVerdict> {
    let baseline = read_json_object(baseline_path)?;
    let metrics = Value::Object(read_json_object(metrics_path)?);

    let verdict = evaluate_baseline(&baseline, &metrics);

    if let Some(parent) = report_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, render_markdown(&verdict))?;

    obs::emit_gate_evaluated(
        verdict.rows.len(),
        verdict.failed_rows().count(),
        verdict.passed(),
    );
    Ok(verdict)
}
