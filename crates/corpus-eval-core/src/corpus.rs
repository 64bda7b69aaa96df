//! Corpus discovery and loading.
//!
//! Picks the first existing candidate directory, seeds a fixed sample when no
//! corpus is available, and reads up to `max_docs` text documents in lexical
//! path order. Reference documentation used by the QA scorer is gathered here
//! as well.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::EvalConfig;
use crate::error::Result;
use crate::obs;

/// File name of the seeded sample document.
pub const SAMPLE_FILE_NAME: &str = "hello.txt";

/// Multilingual sample written when no corpus exists.
pub const SAMPLE_TEXT: &str = "SMDaI – технология декодирования замысла автора. \
SMDaI Board — базовая доска проекта. \
Секрет PROJECT_URL хранит ссылку на проектную доску.";

/// A loaded corpus document. Text is trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

/// Outcome of reading one reference documentation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceRead {
    Loaded(String),
    Failed { path: PathBuf, reason: String },
}

/// Decode bytes as UTF-8, dropping invalid sequences instead of replacing them.
pub fn decode_lenient(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                // `valid_up_to` marks a verified UTF-8 prefix.
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match err.error_len() {
                    Some(len) => rest = &after[len..],
                    None => return out,
                }
            }
        }
    }
}

/// Write the sample document into `dir` unless it is already there.
///
/// Returns the sample path. Existing content is never touched.
pub fn ensure_sample_content(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let sample = dir.join(SAMPLE_FILE_NAME);
    if !sample.exists() {
        std::fs::write(&sample, SAMPLE_TEXT)?;
        obs::emit_corpus_seeded(&sample);
    }
    Ok(sample)
}

/// First candidate directory that exists, seeding the last candidate when none does.
///
/// Returns `None` only when the candidate list is empty.
pub fn choose_corpus_dir(candidates: &[PathBuf]) -> Result<Option<PathBuf>> {
    if let Some(found) = candidates.iter().find(|c| c.is_dir()) {
        return Ok(Some(found.clone()));
    }
    match candidates.last() {
        Some(fallback) => {
            ensure_sample_content(fallback)?;
            Ok(Some(fallback.clone()))
        }
        None => Ok(None),
    }
}

/// Load the corpus described by `config`.
///
/// A chosen directory that yields no documents is seeded with the sample so
/// the pipeline always has input.
pub fn load_documents(config: &EvalConfig) -> Result<Vec<Document>> {
    let Some(dir) = choose_corpus_dir(&config.candidate_dirs)? else {
        return Ok(Vec::new());
    };

    let mut docs = read_documents(&dir, config)?;
    if docs.is_empty() && config.max_docs > 0 {
        ensure_sample_content(&dir)?;
        docs = read_documents(&dir, config)?;
    }

    obs::emit_corpus_loaded(&dir, docs.len());
    Ok(docs)
}

fn read_documents(dir: &Path, config: &EvalConfig) -> Result<Vec<Document>> {
    let mut docs = Vec::new();
    for path in collect_files(dir)? {
        if docs.len() >= config.max_docs {
            break;
        }
        if !config.accepts(&path) {
            continue;
        }
        let text = decode_lenient(&std::fs::read(&path)?);
        let text = text.trim();
        if text.is_empty() {
            obs::emit_record_skipped(&path, "empty document");
            continue;
        }
        docs.push(Document {
            path,
            text: text.to_string(),
        });
    }
    Ok(docs)
}

/// All regular files below `dir`, sorted component-wise.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files_recursive(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Symlinked directories are not descended into; symlinked files are kept.
        if entry.file_type()?.is_dir() {
            collect_files_recursive(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }

    Ok(())
}

fn read_reference(path: &Path) -> ReferenceRead {
    match std::fs::read(path) {
        Ok(bytes) => ReferenceRead::Loaded(decode_lenient(&bytes)),
        Err(err) => ReferenceRead::Failed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
    }
}

/// Read the project documentation used as QA reference text.
///
/// The readme comes first, then every accepted file under the docs directory.
/// Both are optional and unreadable files are skipped.
pub fn gather_reference_texts(config: &EvalConfig) -> Vec<String> {
    let mut reads = Vec::new();
    if config.readme_path.is_file() {
        reads.push(read_reference(&config.readme_path));
    }

    match collect_files(&config.docs_dir) {
        Ok(files) => reads.extend(
            files
                .iter()
                .filter(|p| config.accepts(p))
                .map(|p| read_reference(p)),
        ),
        Err(err) => obs::emit_record_skipped(&config.docs_dir, &err.to_string()),
    }

    reads
        .into_iter()
        .filter_map(|read| match read {
            ReferenceRead::Loaded(text) => Some(text),
            ReferenceRead::Failed { path, reason } => {
                obs::emit_record_skipped(&path, &reason);
                None
            }
        })
        .collect()
}
