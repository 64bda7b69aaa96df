//! Metrics orchestration: load the corpus, run every evaluator, and write
//! the rounded report.

use crate::config::EvalConfig;
use crate::corpus::{gather_reference_texts, load_documents};
use crate::error::Result;
use crate::graph::edges_with_evidence_ratio;
use crate::metrics::{write_metric_report, MetricReport};
use crate::ner::ner_f1;
use crate::obs;
use crate::qa::{qa_accuracy, DEFAULT_QA_PAIRS};
use crate::retrieval::RetrievalEvaluator;

/// Run every evaluator and return the rounded report without writing it.
pub fn compute_metrics(config: &EvalConfig) -> Result<MetricReport> {
    let docs = load_documents(config)?;
    let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();

    let mut reference = texts.clone();
    let references = gather_reference_texts(config);
    reference.extend(references.iter().map(String::as_str));

    let report = MetricReport {
        corpus_ingestion_ok: if docs.is_empty() { 0.0 } else { 1.0 },
        ner_f1: ner_f1(&texts),
        search_ndcg_at_10: RetrievalEvaluator::default()
            .rank_by_score(config.rank_by_score)
            .evaluate(&texts),
        edges_with_evidence_ratio: edges_with_evidence_ratio(&config.edges_path)?,
        qa_accuracy: qa_accuracy(&reference, DEFAULT_QA_PAIRS),
    }
    .rounded();

    for (name, value) in report.entries() {
        obs::emit_metric_computed(name, value);
    }
    Ok(report)
}

/// Compute the report and overwrite `config.metrics_path` with it.
pub fn run_pipeline(config: &EvalConfig) -> Result<MetricReport> {
    let report = compute_metrics(config)?;
    write_metric_report(&config.metrics_path, &report)?;
    obs::emit_metrics_written(&config.metrics_path);
    Ok(report)
}
