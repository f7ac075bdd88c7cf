use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WorkflowError;

/// Canvas coordinate of a node. Display-only, never a correctness input
/// except for the projector's ordering by `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Payload of a source node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceData {
    /// Dataset URL, possibly empty while the user has not typed one yet.
    #[serde(default)]
    pub url: String,
}

/// Payload of a layer node. Layers carry no required fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerData {}

/// Node variant together with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Source(SourceData),
    Layer(LayerData),
}

impl NodeKind {
    /// Default payload for a freshly dropped node of the given kind.
    pub fn default_for(tag: NodeKindTag) -> Self {
        match tag {
            NodeKindTag::Source => NodeKind::Source(SourceData::default()),
            NodeKindTag::Layer => NodeKind::Layer(LayerData::default()),
        }
    }

    pub fn tag(&self) -> NodeKindTag {
        match self {
            NodeKind::Source(_) => NodeKindTag::Source,
            NodeKind::Layer(_) => NodeKindTag::Layer,
        }
    }
}

/// Payload-less node discriminant, as written in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKindTag {
    Source,
    Layer,
}

impl NodeKindTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKindTag::Source => "source",
            NodeKindTag::Layer => "layer",
        }
    }
}

impl fmt::Display for NodeKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKindTag {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(NodeKindTag::Source),
            "layer" => Ok(NodeKindTag::Layer),
            other => Err(WorkflowError::UnknownNodeType(other.to_string())),
        }
    }
}

/// Graph node.
///
/// The kind is fixed at construction; only the source payload, the position
/// and the transient `dragging` flag change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Node {
    pub id: String,
    kind: NodeKind,
    pub position: Position,
    /// Set by the host while the node is being repositioned. Never persisted.
    pub dragging: bool,
    /// `data` keys this crate does not interpret, written back untouched.
    extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            dragging: false,
            extra: Map::new(),
        }
    }

    pub fn source(id: impl Into<String>, url: impl Into<String>, position: Position) -> Self {
        Self::new(id, NodeKind::Source(SourceData { url: url.into() }), position)
    }

    pub fn layer(id: impl Into<String>, position: Position) -> Self {
        Self::new(id, NodeKind::Layer(LayerData::default()), position)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn tag(&self) -> NodeKindTag {
        self.kind.tag()
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Source(_))
    }

    pub fn is_layer(&self) -> bool {
        matches!(self.kind, NodeKind::Layer(_))
    }

    /// Source URL, or `None` for layer nodes.
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Source(data) => Some(data.url.as_str()),
            NodeKind::Layer(_) => None,
        }
    }

    /// Replace the source URL. Returns `false` (and leaves the node alone)
    /// for layer nodes.
    pub fn set_url(&mut self, url: impl Into<String>) -> bool {
        match &mut self.kind {
            NodeKind::Source(data) => {
                data.url = url.into();
                true
            }
            NodeKind::Layer(_) => false,
        }
    }
}

/// Wire shape of a node: `{ id, type, position, data, dragging? }`.
#[derive(Serialize, Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    data: Value,
    #[serde(default, skip_serializing)]
    dragging: bool,
}

impl TryFrom<RawNode> for Node {
    type Error = WorkflowError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let tag: NodeKindTag = raw.node_type.parse()?;
        let mut extra = match raw.data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let kind = match tag {
            // A missing or non-string url is an unset URL.
            NodeKindTag::Source => NodeKind::Source(SourceData {
                url: match extra.remove("url") {
                    Some(Value::String(url)) => url,
                    _ => String::new(),
                },
            }),
            NodeKindTag::Layer => NodeKind::Layer(LayerData::default()),
        };
        Ok(Node {
            id: raw.id,
            kind,
            position: raw.position,
            dragging: raw.dragging,
            extra,
        })
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let node_type = node.tag().as_str().to_string();
        let mut data = node.extra;
        if let NodeKind::Source(source) = node.kind {
            data.insert("url".to_string(), Value::String(source.url));
        }
        RawNode {
            id: node.id,
            node_type,
            position: node.position,
            data: Value::Object(data),
            dragging: node.dragging,
        }
    }
}

/// Directed connection from a source node to a layer node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Graph snapshot: ordered nodes plus ordered edges, persisted as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// First node with the given id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// True when no node is mid-drag, i.e. positions are safe to persist.
    pub fn is_settled(&self) -> bool {
        !self.nodes.iter().any(|n| n.dragging)
    }
}
