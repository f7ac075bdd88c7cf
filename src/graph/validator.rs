use serde::{Deserialize, Serialize};

use super::types::{Graph, NodeKind};

/// A proposed edge. Either endpoint may be unset while a connection drag
/// has not yet landed on a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
        }
    }
}

/// Decide whether `connection` may be added to `graph`.
///
/// Rules, checked in order: both endpoints present, non-empty and distinct;
/// both resolve to nodes; source is a source node and target a layer node;
/// the source has no outgoing edge yet; the target has no incoming edge yet.
/// Pure and allocation-free.
pub fn is_valid_connection(graph: &Graph, connection: &Connection) -> bool {
    let (source, target) = match (connection.source.as_deref(), connection.target.as_deref()) {
        (Some(s), Some(t)) if !s.is_empty() && !t.is_empty() => (s, t),
        _ => {
            tracing::trace!(?connection, "connection rejected: missing endpoint");
            return false;
        }
    };

    if source == target {
        tracing::trace!(node_id = source, "connection rejected: self loop");
        return false;
    }

    let (source_node, target_node) = match (graph.node(source), graph.node(target)) {
        (Some(s), Some(t)) => (s, t),
        _ => {
            tracing::trace!(source, target, "connection rejected: unresolved endpoint");
            return false;
        }
    };

    match (source_node.kind(), target_node.kind()) {
        (NodeKind::Source(_), NodeKind::Layer(_)) => {}
        (NodeKind::Source(_), NodeKind::Source(_))
        | (NodeKind::Layer(_), NodeKind::Source(_))
        | (NodeKind::Layer(_), NodeKind::Layer(_)) => {
            tracing::trace!(source, target, "connection rejected: endpoint kinds");
            return false;
        }
    }

    if graph.edges.iter().any(|e| e.source == source) {
        tracing::trace!(source, "connection rejected: source already connected");
        return false;
    }

    if graph.edges.iter().any(|e| e.target == target) {
        tracing::trace!(target, "connection rejected: layer already connected");
        return false;
    }

    true
}
