//! Corpus evaluation core library.
//!
//! Heuristic quality metrics over a text corpus (entity recognition,
//! retrieval relevance, graph evidence density, QA coverage) and the
//! baseline regression gate that decides whether a change regressed them.

pub mod baseline;
pub mod config;
pub mod corpus;
pub mod error;
pub mod flatten;
pub mod gate;
pub mod graph;
pub mod metrics;
pub mod ner;
pub mod obs;
pub mod pipeline;
pub mod qa;
pub mod retrieval;
pub mod telemetry;
pub mod tokenizer;

pub use baseline::{seed_placeholder_metrics, update_baseline, SeedOutcome};
pub use config::{EvalConfig, DEFAULT_MAX_DOCS};
pub use corpus::{gather_reference_texts, load_documents, Document};
pub use error::{EvalError, Result};
pub use flatten::{flatten_metrics, MetricTree};
pub use gate::{evaluate_baseline, render_markdown, run_gate, GateRow, GateVerdict, RowStatus};
pub use graph::edges_with_evidence_ratio;
pub use metrics::{round3, write_metric_report, MetricReport};
pub use ner::{ner_f1, GoldRule};
pub use obs::RunSpan;
pub use pipeline::{compute_metrics, run_pipeline};
pub use qa::{qa_accuracy, QaPair, DEFAULT_QA_PAIRS};
pub use retrieval::{ndcg_at_k, search_ndcg_at_10, RetrievalEvaluator};
pub use telemetry::init_tracing;
pub use tokenizer::{tokenize, tokens};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
