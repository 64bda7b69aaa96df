//! Structured observability hooks for evaluation runs.
//!
//! Lifecycle events are emitted at `info!` with a stable `event` field so
//! JSON log consumers can filter on it. Skipped records go to `debug!`.

use std::path::Path;

use tracing::{debug, info};

/// RAII guard that enters a span tagged with the command being run.
pub struct RunSpan {
    _span: tracing::span::EnteredSpan,
}

impl RunSpan {
    pub fn enter(command: &str) -> Self {
        let span = tracing::info_span!("corpus_eval.run", command = %command);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: corpus directory chosen and documents loaded.
pub fn emit_corpus_loaded(dir: &Path, documents: usize) {
    info!(event = "corpus.loaded", dir = %dir.display(), documents = documents);
}

/// Emit event: fallback sample written because no corpus was available.
pub fn emit_corpus_seeded(sample: &Path) {
    info!(event = "corpus.seeded", sample = %sample.display());
}

/// Emit event: a file or record was skipped.
pub fn emit_record_skipped(source: &Path, reason: &str) {
    debug!(event = "record.skipped", source = %source.display(), reason = %reason);
}

/// Emit event: one metric computed.
pub fn emit_metric_computed(name: &str, value: f64) {
    info!(event = "metrics.computed", metric = %name, value = value);
}

/// Emit event: metrics report written to disk.
pub fn emit_metrics_written(path: &Path) {
    info!(event = "metrics.written", path = %path.display());
}

/// Emit event: regression gate evaluated.
pub fn emit_gate_evaluated(rows: usize, failed: usize, passed: bool) {
    info!(
        event = "gate.evaluated",
        rows = rows,
        failed = failed,
        passed = passed,
    );
}

/// Emit event: baseline replaced from the metrics report.
pub fn emit_baseline_updated(path: &Path) {
    info!(event = "baseline.updated", path = %path.display());
}
