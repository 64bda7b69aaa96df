//! The flat metrics report written by `compute` and read by the gate.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CORPUS_INGESTION_OK: &str = "corpus.ingestion_ok";
pub const NER_F1: &str = "ling.ner_f1";
pub const SEARCH_NDCG_AT_10: &str = "embed.search_ndcg@10";
pub const EDGES_WITH_EVIDENCE_RATIO: &str = "graph.edges_with_evidence_ratio";
pub const QA_ACCURACY: &str = "qa.accuracy";

/// Round to three decimal places.
///
/// Ties on the exact binary value go to the even digit, so `0.0625` becomes
/// `0.062`.
pub fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

/// One run's metrics. Values lie in [0, 1]; `corpus_ingestion_ok` is 0 or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    #[serde(rename = "corpus.ingestion_ok")]
    pub corpus_ingestion_ok: f64,
    #[serde(rename = "ling.ner_f1")]
    pub ner_f1: f64,
    #[serde(rename = "embed.search_ndcg@10")]
    pub search_ndcg_at_10: f64,
    #[serde(rename = "graph.edges_with_evidence_ratio")]
    pub edges_with_evidence_ratio: f64,
    #[serde(rename = "qa.accuracy")]
    pub qa_accuracy: f64,
}

impl MetricReport {
    /// Copy with every value rounded to three decimals.
    pub fn rounded(&self) -> Self {
        Self {
            corpus_ingestion_ok: round3(self.corpus_ingestion_ok),
            ner_f1: round3(self.ner_f1),
            search_ndcg_at_10: round3(self.search_ndcg_at_10),
            edges_with_evidence_ratio: round3(self.edges_with_evidence_ratio),
            qa_accuracy: round3(self.qa_accuracy),
        }
    }

    /// `(name, value)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            (CORPUS_INGESTION_OK, self.corpus_ingestion_ok),
            (NER_F1, self.ner_f1),
            (SEARCH_NDCG_AT_10, self.search_ndcg_at_10),
            (EDGES_WITH_EVIDENCE_RATIO, self.edges_with_evidence_ratio),
            (QA_ACCURACY, self.qa_accuracy),
        ]
    }

    /// Single-line JSON, used for the stdout echo.
    pub fn to_compact_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Write `report` as pretty JSON, creating parent directories and replacing
/// any previous report.
pub fn write_metric_report(path: &Path, report: &MetricReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content)?;
    Ok(())
}
