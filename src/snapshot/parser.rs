//! Snapshot codec: text in YAML/JSON/TOML to [`Graph`] and back to JSON.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::WorkflowError;
use crate::graph::{Edge, Graph, Node};

/// Supported snapshot input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// JSON format (`.json`), the persisted shape.
    Json,
    /// YAML format (`.yaml` / `.yml`).
    Yaml,
    /// TOML format (`.toml`).
    Toml,
}

impl SnapshotFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(SnapshotFormat::Json),
            "yaml" | "yml" => Some(SnapshotFormat::Yaml),
            "toml" => Some(SnapshotFormat::Toml),
            _ => None,
        }
    }
}

/// Parse a snapshot strictly: any malformed node or edge is an error.
pub fn parse_snapshot(content: &str, format: SnapshotFormat) -> Result<Graph, WorkflowError> {
    let value = parse_snapshot_value(content, format)?;
    serde_json::from_value(value).map_err(|e| WorkflowError::SnapshotParseError(e.to_string()))
}

/// Parse snapshot text into an untyped JSON value.
pub fn parse_snapshot_value(content: &str, format: SnapshotFormat) -> Result<Value, WorkflowError> {
    match format {
        SnapshotFormat::Json => serde_json::from_str(content)
            .map_err(|e| WorkflowError::SnapshotParseError(e.to_string())),
        SnapshotFormat::Yaml => serde_saphyr::from_str(content)
            .map_err(|e| WorkflowError::SnapshotParseError(e.to_string())),
        SnapshotFormat::Toml => {
            let toml_val: toml::Value = toml::from_str(content)
                .map_err(|e| WorkflowError::SnapshotParseError(e.to_string()))?;
            Ok(toml_value_to_json(toml_val))
        }
    }
}

/// Hydrate a snapshot from persisted JSON, never failing.
///
/// Absent or unparsable input gives an empty graph. See [`sanitize_snapshot`]
/// for the handling of partially valid input.
pub fn load_snapshot(raw: Option<&str>) -> Graph {
    let Some(raw) = raw else {
        return Graph::default();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => sanitize_snapshot(&value),
        Err(e) => {
            tracing::warn!(error = %e, "stored snapshot is not valid JSON, starting empty");
            Graph::default()
        }
    }
}

/// Build a graph from an untyped value.
///
/// `nodes` / `edges` that are not arrays become empty; array elements that
/// do not decode are dropped.
pub fn sanitize_snapshot(value: &Value) -> Graph {
    Graph {
        nodes: decode_list::<Node>(value.get("nodes"), "nodes"),
        edges: decode_list::<Edge>(value.get("edges"), "edges"),
    }
}

fn decode_list<T: DeserializeOwned>(value: Option<&Value>, field: &str) -> Vec<T> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::warn!(
                field,
                found = %json_type_name(other),
                "snapshot field is not a list, using empty"
            );
            return Vec::new();
        }
        None => return Vec::new(),
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(field, index, error = %e, "dropping malformed snapshot element");
                None
            }
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serialize to the persisted `{ nodes, edges }` JSON shape.
pub fn to_json(graph: &Graph) -> Result<String, WorkflowError> {
    serde_json::to_string(graph).map_err(|e| WorkflowError::SnapshotSerializeError(e.to_string()))
}

/// Convert a [`toml::Value`] into a [`serde_json::Value`].
///
/// TOML has no null, and `Datetime` values are stringified.
fn toml_value_to_json(val: toml::Value) -> Value {
    match val {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_value_to_json).collect()),
        toml::Value::Table(tbl) => Value::Object(
            tbl.into_iter()
                .map(|(k, v)| (k, toml_value_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;
    use serde_json::json;

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "nodes": [
                {"id": "source-1", "type": "source", "position": {"x": 0, "y": 0}, "data": {"url": "https://x/a.geojson"}},
                {"id": "layer-1", "type": "layer", "position": {"x": 0, "y": 100}, "data": {}}
            ],
            "edges": [{"id": "edge-1", "source": "source-1", "target": "layer-1"}]
        }"#;
        let graph = parse_snapshot(json, SnapshotFormat::Json).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges[0].target, "layer-1");
        assert_eq!(graph.nodes[1].position, Position::new(0.0, 100.0));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
nodes:
  - id: source-1
    type: source
    position: { x: 0, y: 0 }
    data: { url: "https://x/a.geojson" }
  - id: layer-1
    type: layer
    position: { x: 0, y: 10 }
edges:
  - id: edge-1
    source: source-1
    target: layer-1
"#;
        let graph = parse_snapshot(yaml, SnapshotFormat::Yaml).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].url(), Some("https://x/a.geojson"));
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[[nodes]]
id = "source-1"
type = "source"
[nodes.data]
url = "https://x/a.geojson"

[[nodes]]
id = "layer-1"
type = "layer"
[nodes.position]
x = 0
y = 25.5

[[edges]]
id = "edge-1"
source = "source-1"
target = "layer-1"
"#;
        let graph = parse_snapshot(toml_str, SnapshotFormat::Toml).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[1].position.y, 25.5);
        assert_eq!(graph.edges[0].source, "source-1");
    }

    #[test]
    fn test_parse_strict_rejects_unknown_node_type() {
        let json = r#"{"nodes": [{"id": "n", "type": "output"}], "edges": []}"#;
        assert!(parse_snapshot(json, SnapshotFormat::Json).is_err());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_snapshot("{{{invalid", SnapshotFormat::Json).is_err());
        assert!(parse_snapshot("[[[bad", SnapshotFormat::Toml).is_err());
    }

    #[test]
    fn test_parse_missing_lists_default_empty() {
        let graph = parse_snapshot("{}", SnapshotFormat::Json).unwrap();
        assert_eq!(graph, Graph::default());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")), Some(SnapshotFormat::Json));
        assert_eq!(SnapshotFormat::from_path(Path::new("a.YML")), Some(SnapshotFormat::Yaml));
        assert_eq!(SnapshotFormat::from_path(Path::new("a.toml")), Some(SnapshotFormat::Toml));
        assert_eq!(SnapshotFormat::from_path(Path::new("a.txt")), None);
        assert_eq!(SnapshotFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_load_absent_or_invalid() {
        assert_eq!(load_snapshot(None), Graph::default());
        assert_eq!(load_snapshot(Some("not-json")), Graph::default());
        assert_eq!(load_snapshot(Some("42")), Graph::default());
    }

    #[test]
    fn test_load_non_list_fields() {
        let raw = json!({ "nodes": { "bad": true }, "edges": "also-bad" }).to_string();
        assert_eq!(load_snapshot(Some(&raw)), Graph::default());
    }

    #[test]
    fn test_load_drops_malformed_elements() {
        let raw = json!({
            "nodes": [
                { "id": "source-1", "type": "source", "position": { "x": 0, "y": 0 }, "data": { "url": "https://x/a.geojson" } },
                { "id": "weird", "type": "output" },
                "not-a-node",
                { "id": "layer-1", "type": "layer", "position": { "x": 0, "y": 0 }, "data": {} }
            ],
            "edges": [
                { "id": "edge-1", "source": "source-1", "target": "layer-1" },
                { "id": "edge-2", "source": "source-1" }
            ]
        })
        .to_string();
        let graph = load_snapshot(Some(&raw));
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["source-1", "layer-1"]);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_load_keeps_source_with_null_url() {
        let raw = json!({
            "nodes": [
                { "id": "source-1", "type": "source", "data": { "url": null } },
                { "id": "layer-1", "type": "layer", "data": { "label": "Roads" } }
            ],
            "edges": [{ "id": "edge-1", "source": "source-1", "target": "layer-1" }]
        })
        .to_string();
        let graph = load_snapshot(Some(&raw));
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].url(), Some(""));

        let saved: Value = serde_json::from_str(&to_json(&graph).unwrap()).unwrap();
        assert_eq!(saved["nodes"][1]["data"]["label"], "Roads");
    }

    #[test]
    fn test_to_json_round_trips_through_load() {
        let graph = Graph::new(
            vec![
                Node::source("s", "https://x/a.geojson", Position::new(10.0, 20.0)),
                Node::layer("l", Position::new(0.0, 5.0)),
            ],
            vec![Edge::new("e", "s", "l")],
        );
        let raw = to_json(&graph).unwrap();
        assert_eq!(load_snapshot(Some(&raw)), graph);
    }

    #[test]
    fn test_empty_graph_json_shape() {
        assert_eq!(to_json(&Graph::default()).unwrap(), r#"{"nodes":[],"edges":[]}"#);
    }
}
