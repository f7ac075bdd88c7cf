use std::collections::{HashMap, HashSet};

use crate::graph::{Graph, Node, NodeKind};

use super::types::{error, warn, Diagnostic};

/// Connection rules: source→layer direction and the one-to-one matching.
/// Edges with unresolved endpoints are left to the structure checks.
pub fn validate(graph: &Graph) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let nodes_by_id: HashMap<&str, &Node> =
        graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut used_sources = HashSet::new();
    let mut used_layers = HashSet::new();

    for edge in &graph.edges {
        if let Some(source) = nodes_by_id.get(edge.source.as_str()) {
            match source.kind() {
                NodeKind::Source(data) => {
                    if data.url.trim().is_empty() {
                        diags.push(warn(
                            "W101",
                            format!("Connected source has no URL: {}", source.id),
                            Some(source.id.clone()),
                            Some(edge.id.clone()),
                        ));
                    }
                }
                NodeKind::Layer(_) => diags.push(error(
                    "E105",
                    format!("Edge source is not a source node: {}", source.id),
                    Some(source.id.clone()),
                    Some(edge.id.clone()),
                )),
            }
        }

        if let Some(target) = nodes_by_id.get(edge.target.as_str()) {
            if !target.is_layer() {
                diags.push(error(
                    "E106",
                    format!("Edge target is not a layer node: {}", target.id),
                    Some(target.id.clone()),
                    Some(edge.id.clone()),
                ));
            }
        }

        if !used_sources.insert(edge.source.as_str()) {
            diags.push(error(
                "E107",
                format!("Source already has an outgoing edge: {}", edge.source),
                Some(edge.source.clone()),
                Some(edge.id.clone()),
            ));
        }
        if !used_layers.insert(edge.target.as_str()) {
            diags.push(error(
                "E108",
                format!("Layer already has an incoming edge: {}", edge.target),
                Some(edge.target.clone()),
                Some(edge.id.clone()),
            ));
        }
    }

    diags
}
