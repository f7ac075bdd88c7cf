use geoflow::{Edge, Graph, Node, Position};

/// `count` sources each wired to its own layer, layers stacked bottom-up so
/// the projection has to reorder them.
pub fn build_paired_graph(count: usize) -> Graph {
    let mut nodes = Vec::with_capacity(count * 2);
    let mut edges = Vec::with_capacity(count);
    for i in 0..count {
        let source = format!("source-{}", i);
        let layer = format!("layer-{}", i);
        nodes.push(Node::source(
            source.clone(),
            format!("https://example.com/{}.geojson", i),
            Position::new(0.0, i as f64 * 40.0),
        ));
        nodes.push(Node::layer(
            layer.clone(),
            Position::new(300.0, (count - i) as f64 * 40.0),
        ));
        edges.push(Edge::new(format!("edge-{}", i), source, layer));
    }
    Graph::new(nodes, edges)
}

/// Same shape as [`build_paired_graph`] plus one free source and one free layer.
pub fn build_graph_with_free_pair(count: usize) -> Graph {
    let mut graph = build_paired_graph(count);
    graph
        .nodes
        .push(Node::source("free-source", "https://example.com/free.geojson", Position::default()));
    graph.nodes.push(Node::layer("free-layer", Position::default()));
    graph
}
