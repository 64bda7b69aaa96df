//! Error taxonomy for corpus evaluation.
//!
//! Only conditions that must stop a run live here. Missing optional inputs
//! and malformed records degrade to sentinel values inside the evaluators
//! and never surface as an [`EvalError`].

use std::path::PathBuf;

/// Fatal errors produced by the metrics pipeline, the gate, and baseline
/// maintenance.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("required input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("expected a JSON object at the top level of {}", path.display())]
    NotAnObject { path: PathBuf },

    #[error("metrics report not found at {}; run `compute` first", path.display())]
    MetricsNotFound { path: PathBuf },

    #[error("baseline already exists at {}; rerun with --force to overwrite", path.display())]
    BaselineExists { path: PathBuf },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for corpus evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;
