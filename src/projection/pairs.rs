use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Graph, Node, NodeKind};

/// One renderable (dataset, layer) binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLayerPair {
    /// Source URL with surrounding whitespace trimmed.
    pub data_url: String,
    pub source_id: String,
    pub layer_id: String,
    /// Vertical position of the layer node, the ordering key.
    pub layer_y: f64,
}

/// Project `graph` onto its source→layer pairs, top layer first.
///
/// Edges whose endpoints do not resolve, have the wrong kinds, or whose
/// source URL is blank are skipped. The sort is stable, so pairs whose layers
/// share a `y` keep edge order. Never fails.
pub fn get_ordered_source_layer_pairs(graph: &Graph) -> Vec<SourceLayerPair> {
    // Later duplicates overwrite earlier ones. Duplicate ids are surfaced by
    // `snapshot::validate_graph` rather than here.
    let nodes_by_id: HashMap<&str, &Node> =
        graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut pairs: Vec<SourceLayerPair> = graph
        .edges
        .iter()
        .filter_map(|edge| to_pair(edge, &nodes_by_id))
        .collect();

    pairs.sort_by(|left, right| left.layer_y.total_cmp(&right.layer_y));
    pairs
}

fn to_pair(edge: &Edge, nodes_by_id: &HashMap<&str, &Node>) -> Option<SourceLayerPair> {
    let source = nodes_by_id.get(edge.source.as_str())?;
    let layer = nodes_by_id.get(edge.target.as_str())?;

    let data_url = match (source.kind(), layer.kind()) {
        (NodeKind::Source(data), NodeKind::Layer(_)) => data.url.trim(),
        _ => return None,
    };
    if data_url.is_empty() {
        return None;
    }

    Some(SourceLayerPair {
        data_url: data_url.to_string(),
        source_id: source.id.clone(),
        layer_id: layer.id.clone(),
        layer_y: layer.position.y,
    })
}
