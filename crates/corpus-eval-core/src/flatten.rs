//! Nested metric documents flattened into dotted keys.
//!
//! `{"x": {"y": 0.95}}` becomes `x.y -> 0.95`. Flattening is a pure transform
//! so the gate can be exercised without touching the filesystem.

use serde_json::{Map, Value};

/// A metrics document: mappings are branches, everything else is a leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricTree {
    Leaf(Value),
    Node(Vec<(String, MetricTree)>),
}

impl MetricTree {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::Node(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
            leaf => Self::Leaf(leaf.clone()),
        }
    }

    /// Leaves keyed by their dotted path, in document order.
    ///
    /// Empty branches contribute nothing. A bare leaf at the root is keyed by
    /// the empty string.
    pub fn flatten(&self) -> Map<String, Value> {
        let mut out = Map::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Map<String, Value>) {
        match self {
            Self::Leaf(value) => {
                out.insert(prefix.to_string(), value.clone());
            }
            Self::Node(children) => {
                for (key, child) in children {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    child.flatten_into(&path, out);
                }
            }
        }
    }
}

/// Flatten a JSON document into dotted keys.
pub fn flatten_metrics(value: &Value) -> Map<String, Value> {
    MetricTree::from_json(value).flatten()
}
