use std::collections::HashSet;

use crate::graph::Graph;

use super::types::{error, Diagnostic};

/// Identity checks: unique ids, resolvable endpoints, no self loops.
pub fn validate(graph: &Graph) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    let mut node_ids = HashSet::new();
    let mut reported = HashSet::new();
    for node in &graph.nodes {
        if !node_ids.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
            diags.push(error(
                "E101",
                format!("Duplicate node id: {}", node.id),
                Some(node.id.clone()),
                None,
            ));
        }
    }

    let mut edge_ids = HashSet::new();
    for edge in &graph.edges {
        if !edge_ids.insert(edge.id.as_str()) {
            diags.push(error(
                "E109",
                format!("Duplicate edge id: {}", edge.id),
                None,
                Some(edge.id.clone()),
            ));
        }
        if !node_ids.contains(edge.source.as_str()) {
            diags.push(error(
                "E102",
                format!("Edge source not found: {}", edge.source),
                None,
                Some(edge.id.clone()),
            ));
        }
        if !node_ids.contains(edge.target.as_str()) {
            diags.push(error(
                "E103",
                format!("Edge target not found: {}", edge.target),
                None,
                Some(edge.id.clone()),
            ));
        }
        if edge.source == edge.target {
            diags.push(error(
                "E104",
                "Edge has same source and target".to_string(),
                Some(edge.source.clone()),
                Some(edge.id.clone()),
            ));
        }
    }

    diags
}
