//! Edit operations over graph snapshots.
//!
//! Every operation borrows the current [`Graph`] and returns a new one, so a
//! caller never observes a half-applied edit. `None` means the edit was a
//! no-op and nothing should be written.

use serde::{Deserialize, Serialize};

use super::types::{Edge, Graph, Node, NodeKind, NodeKindTag, Position};
use super::validator::{is_valid_connection, Connection};
use crate::core::IdGenerator;

/// Prefix of ids allocated for dropped nodes.
pub const NODE_ID_PREFIX: &str = "dndnode";
/// Prefix of ids allocated for new edges.
pub const EDGE_ID_PREFIX: &str = "edge";

/// A single user-driven edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GraphMutation {
    /// Drop a new node of `kind` onto the canvas.
    AddNode {
        kind: NodeKindTag,
        #[serde(default)]
        position: Position,
    },
    /// Add an edge if the validator accepts it.
    Connect(Connection),
    RemoveEdge { edge_id: String },
    UpdateSourceUrl { node_id: String, url: String },
    /// Position change reported by the host, including the transient drag flag.
    MoveNode {
        node_id: String,
        position: Position,
        #[serde(default)]
        dragging: bool,
    },
    /// Delete a node together with every edge touching it.
    RemoveNode { node_id: String },
}

/// Apply `mutation` to `graph`. Returns `None` when the edit is a no-op.
pub fn apply_mutation(
    graph: &Graph,
    mutation: &GraphMutation,
    ids: &dyn IdGenerator,
) -> Option<Graph> {
    let next = match mutation {
        GraphMutation::AddNode { kind, position } => Some(add_node(graph, *kind, *position, ids)),
        GraphMutation::Connect(connection) => connect(graph, connection, ids),
        GraphMutation::RemoveEdge { edge_id } => remove_edge(graph, edge_id),
        GraphMutation::UpdateSourceUrl { node_id, url } => update_source_url(graph, node_id, url),
        GraphMutation::MoveNode {
            node_id,
            position,
            dragging,
        } => move_node(graph, node_id, *position, *dragging),
        GraphMutation::RemoveNode { node_id } => remove_node(graph, node_id),
    };
    match &next {
        Some(_) => tracing::debug!(?mutation, "mutation applied"),
        None => tracing::debug!(?mutation, "mutation was a no-op"),
    }
    next
}

impl Graph {
    /// Apply `mutation`, returning an unchanged copy when it is a no-op.
    pub fn apply(&self, mutation: &GraphMutation, ids: &dyn IdGenerator) -> Graph {
        apply_mutation(self, mutation, ids).unwrap_or_else(|| self.clone())
    }
}

/// Append a node with a fresh id and the default payload for `kind`.
pub fn add_node(
    graph: &Graph,
    kind: NodeKindTag,
    position: Position,
    ids: &dyn IdGenerator,
) -> Graph {
    let id = format!("{}_{}", NODE_ID_PREFIX, ids.next_id());
    let mut next = graph.clone();
    next.nodes.push(Node::new(id, NodeKind::default_for(kind), position));
    next
}

/// Append an edge for `connection` if it passes [`is_valid_connection`].
pub fn connect(graph: &Graph, connection: &Connection, ids: &dyn IdGenerator) -> Option<Graph> {
    if !is_valid_connection(graph, connection) {
        return None;
    }
    // Both endpoints are present once the validator has accepted them.
    let source = connection.source.as_deref()?;
    let target = connection.target.as_deref()?;
    let id = format!("{}_{}", EDGE_ID_PREFIX, ids.next_id());
    let mut next = graph.clone();
    next.edges.push(Edge::new(id, source, target));
    Some(next)
}

/// Remove the edge with `edge_id`, keeping the order of the rest.
pub fn remove_edge(graph: &Graph, edge_id: &str) -> Option<Graph> {
    graph.edge(edge_id)?;
    let mut next = graph.clone();
    next.edges.retain(|e| e.id != edge_id);
    Some(next)
}

/// Replace the URL of the source node `node_id`. Layer nodes, unknown ids and
/// unchanged values are no-ops.
pub fn update_source_url(graph: &Graph, node_id: &str, url: &str) -> Option<Graph> {
    let changes = graph
        .nodes
        .iter()
        .any(|n| n.id == node_id && n.url().is_some_and(|current| current != url));
    if !changes {
        return None;
    }
    let mut next = graph.clone();
    for node in next.nodes.iter_mut().filter(|n| n.id == node_id) {
        node.set_url(url);
    }
    Some(next)
}

/// Set the position and drag flag of `node_id`.
pub fn move_node(
    graph: &Graph,
    node_id: &str,
    position: Position,
    dragging: bool,
) -> Option<Graph> {
    if graph.node(node_id).is_none() {
        return None;
    }
    let mut next = graph.clone();
    for node in next.nodes.iter_mut().filter(|n| n.id == node_id) {
        node.position = position;
        node.dragging = dragging;
    }
    Some(next)
}

/// Remove `node_id` and all of its incident edges.
pub fn remove_node(graph: &Graph, node_id: &str) -> Option<Graph> {
    if graph.node(node_id).is_none() {
        return None;
    }
    let mut next = graph.clone();
    next.nodes.retain(|n| n.id != node_id);
    next.edges.retain(|e| e.source != node_id && e.target != node_id);
    Some(next)
}
