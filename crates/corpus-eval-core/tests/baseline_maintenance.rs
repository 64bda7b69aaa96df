use corpus_eval_core::{seed_placeholder_metrics, update_baseline, EvalError, SeedOutcome};
use serde_json::{json, Value};
use std::path::Path;

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn update_requires_metrics() {
    let tmp = tempfile::tempdir().unwrap();
    let err = update_baseline(
        &tmp.path().join("metrics.json"),
        &tmp.path().join("baseline.json"),
        true,
    )
    .unwrap_err();
    assert!(matches!(err, EvalError::MetricsNotFound { .. }));
}

#[test]
fn update_refuses_to_overwrite_without_force() {
    let tmp = tempfile::tempdir().unwrap();
    let metrics = tmp.path().join("metrics.json");
    let baseline = tmp.path().join("baseline.json");
    std::fs::write(&metrics, r#"{"qa.accuracy": 0.9}"#).unwrap();
    std::fs::write(&baseline, r#"{"qa.accuracy": 0.5}"#).unwrap();

    let err = update_baseline(&metrics, &baseline, false).unwrap_err();
    assert!(matches!(err, EvalError::BaselineExists { .. }));
    assert_eq!(read_json(&baseline), json!({"qa.accuracy": 0.5}));

    update_baseline(&metrics, &baseline, true).unwrap();
    assert_eq!(read_json(&baseline), json!({"qa.accuracy": 0.9}));
}

#[test]
fn update_creates_first_baseline() {
    let tmp = tempfile::tempdir().unwrap();
    let metrics = tmp.path().join("metrics.json");
    let baseline = tmp.path().join("eval").join("baseline.json");
    std::fs::write(&metrics, r#"{"a": 1.0}"#).unwrap();

    update_baseline(&metrics, &baseline, false).unwrap();
    assert_eq!(read_json(&baseline), json!({"a": 1.0}));
}

#[test]
fn seed_derives_placeholders_once() {
    let tmp = tempfile::tempdir().unwrap();
    let baseline = tmp.path().join("baseline.json");
    let metrics = tmp.path().join("eval").join("metrics.json");
    std::fs::write(
        &baseline,
        json!({
            "corpus.ingestion_ok": 1.0,
            "ling.ner_f1": 0.3,
            "embed.search_ndcg@10": 0.995,
            "graph.edges_with_evidence_ratio": 0.0,
            "note": "manual"
        })
        .to_string(),
    )
    .unwrap();

    assert_eq!(
        seed_placeholder_metrics(&baseline, &metrics).unwrap(),
        SeedOutcome::Written
    );
    assert_eq!(
        read_json(&metrics),
        json!({
            "corpus.ingestion_ok": 1.0,
            "ling.ner_f1": 0.31,
            "embed.search_ndcg@10": 0.99,
            "graph.edges_with_evidence_ratio": 0.0,
            "note": "manual"
        })
    );

    std::fs::write(&metrics, r#"{"kept": true}"#).unwrap();
    assert_eq!(
        seed_placeholder_metrics(&baseline, &metrics).unwrap(),
        SeedOutcome::Kept
    );
    assert_eq!(read_json(&metrics), json!({"kept": true}));
}

#[test]
fn seed_without_baseline_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let err = seed_placeholder_metrics(
        &tmp.path().join("baseline.json"),
        &tmp.path().join("metrics.json"),
    )
    .unwrap_err();
    assert!(matches!(err, EvalError::InputNotFound { .. }));
}
