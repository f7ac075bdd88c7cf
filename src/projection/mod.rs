//! Projection of a graph onto the ordered (dataset, layer) pairs consumed by
//! the map renderer.

pub mod pairs;

pub use pairs::{get_ordered_source_layer_pairs, SourceLayerPair};
