//! Workspace manifest invariants the crates rely on.

use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("crate lives two levels below the workspace root")
        .to_path_buf()
}

fn manifest(path: &Path) -> toml::Value {
    let raw = std::fs::read_to_string(path.join("Cargo.toml")).unwrap();
    raw.parse().unwrap()
}

#[test]
fn member_crates_inherit_workspace_version() {
    let root = workspace_root();
    for krate in ["crates/corpus-eval-core", "crates/corpus-eval-cli"] {
        let doc = manifest(&root.join(krate));
        let inherited = doc["package"]["version"]
            .get("workspace")
            .and_then(toml::Value::as_bool);
        assert_eq!(inherited, Some(true), "{krate} should use version.workspace = true");
    }
}

#[test]
fn workspace_version_matches_cargo_pkg() {
    let doc = manifest(&workspace_root());
    let ws_version = doc["workspace"]["package"]["version"].as_str().unwrap();
    assert_eq!(ws_version, env!("CARGO_PKG_VERSION"));
}

/// Gate rows follow baseline key order, which needs an order-preserving JSON map.
#[test]
fn serde_json_preserves_key_order() {
    let doc = manifest(&workspace_root());
    let features = doc["workspace"]["dependencies"]["serde_json"]["features"]
        .as_array()
        .expect("serde_json declares features");
    assert!(features
        .iter()
        .any(|f| f.as_str() == Some("preserve_order")));
}
