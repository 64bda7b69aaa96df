//! Graph evidence density.
//!
//! Reads the newline-delimited JSON edge file and reports the share of edges
//! that carry a truthy `evidence` field.

use std::path::Path;

use serde_json::Value;

use crate::corpus::decode_lenient;
use crate::error::Result;
use crate::obs;

/// Classification of one line of the edge file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeLine {
    Edge { has_evidence: bool },
    Blank,
    Malformed,
}

/// Counts accumulated over an edge file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvidenceTally {
    pub total: usize,
    pub with_evidence: usize,
    pub skipped: usize,
}

impl EvidenceTally {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.with_evidence as f64 / self.total as f64
        }
    }

    fn add(&mut self, line: EdgeLine) {
        match line {
            EdgeLine::Edge { has_evidence } => {
                self.total += 1;
                if has_evidence {
                    self.with_evidence += 1;
                }
            }
            EdgeLine::Blank => {}
            EdgeLine::Malformed => self.skipped += 1,
        }
    }
}

/// JSON truthiness: null, false, zero and empty containers are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Classify one line. Lines that are not JSON objects count as malformed.
pub fn parse_edge_line(line: &str) -> EdgeLine {
    if line.trim().is_empty() {
        return EdgeLine::Blank;
    }
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(edge)) => EdgeLine::Edge {
            has_evidence: edge.get("evidence").is_some_and(is_truthy),
        },
        _ => EdgeLine::Malformed,
    }
}

/// Tally every line of `content`.
pub fn tally_edges(content: &str) -> EvidenceTally {
    let mut tally = EvidenceTally::default();
    for line in content.lines() {
        tally.add(parse_edge_line(line));
    }
    tally
}

/// Evidence ratio of the edge file at `path`, 0 when the file does not exist.
pub fn edges_with_evidence_ratio(path: &Path) -> Result<f64> {
    if !path.is_file() {
        return Ok(0.0);
    }
    let content = decode_lenient(&std::fs::read(path)?);
    let tally = tally_edges(&content);
    if tally.skipped > 0 {
        obs::emit_record_skipped(path, &format!("{} malformed edge line(s)", tally.skipped));
    }
    Ok(tally.ratio())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("doc#3")));
        assert!(is_truthy(&json!(["a"])));
        assert!(is_truthy(&json!({"src": "x"})));
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(parse_edge_line("   "), EdgeLine::Blank);
        assert_eq!(parse_edge_line("{not json"), EdgeLine::Malformed);
        assert_eq!(parse_edge_line("[1, 2]"), EdgeLine::Malformed);
        assert_eq!(
            parse_edge_line(r#"{"from": "a", "to": "b"}"#),
            EdgeLine::Edge {
                has_evidence: false
            }
        );
        assert_eq!(
            parse_edge_line(r#"{"from": "a", "evidence": "quote"}"#),
            EdgeLine::Edge { has_evidence: true }
        );
    }

    #[test]
    fn malformed_lines_stay_out_of_denominator() {
        let content = concat!(
            "{\"evidence\": true}\n",
            "garbage\n",
            "\n",
            "{\"evidence\": null}\n",
        );
        let tally = tally_edges(content);
        assert_eq!(tally.total, 2);
        assert_eq!(tally.with_evidence, 1);
        assert_eq!(tally.skipped, 1);
        assert_eq!(tally.ratio(), 0.5);
    }

    #[test]
    fn missing_or_empty_file_is_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("edges.jsonl");
        assert_eq!(edges_with_evidence_ratio(&path).unwrap(), 0.0);

        std::fs::write(&path, "").unwrap();
        assert_eq!(edges_with_evidence_ratio(&path).unwrap(), 0.0);
    }

    #[test]
    fn all_evidence_is_one() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("edges.jsonl");
        std::fs::write(
            &path,
            "{\"evidence\": true}\n{\"evidence\": true, \"w\": 2}\n",
        )
        .unwrap();
        assert_eq!(edges_with_evidence_ratio(&path).unwrap(), 1.0);
    }
}
