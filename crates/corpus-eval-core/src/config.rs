//! Explicit run configuration.
//!
//! Every component receives its paths and limits from an [`EvalConfig`]
//! instead of resolving them relative to the process.

use std::path::{Path, PathBuf};

/// Default upper bound on the number of corpus documents loaded per run.
pub const DEFAULT_MAX_DOCS: usize = 20;

/// File extensions read as plain text, compared case-insensitively.
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "md"];

/// Paths and limits for one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    /// Project root all default paths are derived from.
    pub root: PathBuf,
    /// Corpus directories tried in order. The last one is seeded when none exists.
    pub candidate_dirs: Vec<PathBuf>,
    /// Maximum number of corpus documents to load.
    pub max_docs: usize,
    /// Accepted file extensions without the leading dot.
    pub extensions: Vec<String>,
    /// Newline-delimited JSON edge file.
    pub edges_path: PathBuf,
    /// Optional root documentation file.
    pub readme_path: PathBuf,
    /// Optional documentation directory.
    pub docs_dir: PathBuf,
    /// Where the metrics report is written.
    pub metrics_path: PathBuf,
    /// Where the baseline thresholds live.
    pub baseline_path: PathBuf,
    /// Sort documents by score before computing NDCG instead of using load order.
    pub rank_by_score: bool,
}

impl EvalConfig {
    /// Derive the standard layout below `root`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            candidate_dirs: vec![
                root.join("data").join("snapshots"),
                root.join("data").join("samples"),
            ],
            max_docs: DEFAULT_MAX_DOCS,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            edges_path: root.join("graph").join("edges.jsonl"),
            readme_path: root.join("Readme.md"),
            docs_dir: root.join("docs"),
            metrics_path: root.join("eval").join("metrics.json"),
            baseline_path: root.join("eval").join("baseline.json"),
            rank_by_score: false,
            root,
        }
    }

    pub fn with_candidate_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.candidate_dirs = dirs;
        self
    }

    pub fn with_max_docs(mut self, max_docs: usize) -> Self {
        self.max_docs = max_docs;
        self
    }

    pub fn with_edges_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.edges_path = path.into();
        self
    }

    pub fn with_metrics_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.metrics_path = path.into();
        self
    }

    pub fn with_rank_by_score(mut self, rank_by_score: bool) -> Self {
        self.rank_by_score = rank_by_score;
        self
    }

    /// Whether `path` carries one of the accepted extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::for_root(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_derive_from_root() {
        let cfg = EvalConfig::for_root("/srv/project");
        assert_eq!(
            cfg.candidate_dirs,
            vec![
                PathBuf::from("/srv/project/data/snapshots"),
                PathBuf::from("/srv/project/data/samples"),
            ]
        );
        assert_eq!(cfg.edges_path, PathBuf::from("/srv/project/graph/edges.jsonl"));
        assert_eq!(cfg.metrics_path, PathBuf::from("/srv/project/eval/metrics.json"));
        assert_eq!(cfg.baseline_path, PathBuf::from("/srv/project/eval/baseline.json"));
        assert_eq!(cfg.max_docs, DEFAULT_MAX_DOCS);
        assert!(!cfg.rank_by_score);
    }

    #[test]
    fn builder_overrides() {
        let cfg = EvalConfig::for_root("r")
            .with_max_docs(3)
            .with_rank_by_score(true)
            .with_candidate_dirs(vec![PathBuf::from("corpus")]);
        assert_eq!(cfg.max_docs, 3);
        assert!(cfg.rank_by_score);
        assert_eq!(cfg.candidate_dirs, vec![PathBuf::from("corpus")]);
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        let cfg = EvalConfig::default();
        assert!(cfg.accepts(Path::new("notes/a.txt")));
        assert!(cfg.accepts(Path::new("notes/README.MD")));
        assert!(!cfg.accepts(Path::new("notes/data.json")));
        assert!(!cfg.accepts(Path::new("notes/Makefile")));
    }
}
