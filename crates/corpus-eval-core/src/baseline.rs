//! Baseline maintenance around the regression gate.
//!
//! [`update_baseline`] promotes the current metrics report to the new
//! baseline. [`seed_placeholder_metrics`] writes a metrics report derived from
//! the baseline when none exists yet, so the gate has something to compare
//! against on a fresh checkout.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{EvalError, Result};
use crate::gate::{coerce_number, read_json_object};
use crate::metrics::round3;
use crate::obs;

/// Placeholder values never exceed this ceiling.
const PLACEHOLDER_CEILING: f64 = 0.99;

/// Margin added to each baseline value when seeding placeholders.
const PLACEHOLDER_MARGIN: f64 = 0.01;

/// What [`seed_placeholder_metrics`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// A metrics report already existed and was left alone.
    Kept,
    /// A placeholder report was written.
    Written,
}

/// Copy the metrics report over the baseline.
///
/// Refuses to replace an existing baseline unless `force` is set.
pub fn update_baseline(metrics_path: &Path, baseline_path: &Path, force: bool) -> Result<()> {
    if !metrics_path.is_file() {
        return Err(EvalError::MetricsNotFound {
            path: metrics_path.to_path_buf(),
        });
    }
    if baseline_path.exists() && !force {
        return Err(EvalError::BaselineExists {
            path: baseline_path.to_path_buf(),
        });
    }

    if let Some(parent) = baseline_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(metrics_path, baseline_path)?;
    obs::emit_baseline_updated(baseline_path);
    Ok(())
}

/// Placeholder value for one baseline entry.
///
/// Binary flags (exactly 0 or 1) are copied, other numbers get a small
/// margin capped below 1, and non-numeric entries are copied verbatim.
pub fn placeholder_value(baseline: &Value) -> Value {
    match coerce_number(baseline) {
        Some(x) if x == 0.0 || x == 1.0 => Value::from(x),
        Some(x) => Value::from(round3((x + PLACEHOLDER_MARGIN).min(PLACEHOLDER_CEILING))),
        None => baseline.clone(),
    }
}

/// Derive a full placeholder report from `baseline`.
pub fn placeholder_metrics(baseline: &Map<String, Value>) -> Map<String, Value> {
    baseline
        .iter()
        .map(|(k, v)| (k.clone(), placeholder_value(v)))
        .collect()
}

/// Write placeholder metrics unless a report already exists.
pub fn seed_placeholder_metrics(baseline_path: &Path, metrics_path: &Path) -> Result<SeedOutcome> {
    if metrics_path.exists() {
        return Ok(SeedOutcome::Kept);
    }

    let baseline = read_json_object(baseline_path)?;
    let metrics = placeholder_metrics(&baseline);

    if let Some(parent) = metrics_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(metrics_path, serde_json::to_string_pretty(&metrics)?)?;
    obs::emit_metrics_written(metrics_path);
    Ok(SeedOutcome::Written)
}
