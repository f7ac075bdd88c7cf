//! # geoflow: workflow graphs for map layer editors
//!
//! `geoflow` is the model behind a visual editor where users drop **source**
//! nodes (a GeoJSON URL) and **layer** nodes onto a canvas and wire them
//! together. The crate owns the rules; the host owns the pixels.
//!
//! - **Graph model**: [`Node`], [`Edge`] and the [`Graph`] snapshot.
//! - **Connection rules**: [`is_valid_connection`] keeps edges directed
//!   source→layer and the connections a one-to-one matching.
//! - **Edits**: [`GraphMutation`] applied via [`apply_mutation`], always
//!   snapshot-in / snapshot-out.
//! - **Projection**: [`get_ordered_source_layer_pairs`] turns a graph into
//!   the (URL, layer) list the map renders, top layer first.
//! - **Snapshots**: tolerant hydrate ([`load_snapshot`]), strict parse of
//!   JSON/YAML/TOML ([`parse_snapshot`]) and invariant reports
//!   ([`validate_graph`]).
//! - **Editor boundary**: [`WorkflowEditor`] debounces URL typing and holds
//!   back persistence while a node is being dragged.
//!
//! # Quick Start
//!
//! ```rust
//! use geoflow::{
//!     get_ordered_source_layer_pairs, Connection, FakeIdGenerator, Graph, GraphMutation,
//!     NodeKindTag, Position,
//! };
//!
//! let ids = FakeIdGenerator::new("n".to_string());
//! let graph = Graph::default()
//!     .apply(&GraphMutation::AddNode { kind: NodeKindTag::Source, position: Position::new(0.0, 0.0) }, &ids)
//!     .apply(&GraphMutation::AddNode { kind: NodeKindTag::Layer, position: Position::new(200.0, 0.0) }, &ids)
//!     .apply(&GraphMutation::UpdateSourceUrl {
//!         node_id: "dndnode_n-0".to_string(),
//!         url: "https://example.com/a.geojson".to_string(),
//!     }, &ids)
//!     .apply(&GraphMutation::Connect(Connection::new("dndnode_n-0", "dndnode_n-1")), &ids);
//!
//! let pairs = get_ordered_source_layer_pairs(&graph);
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].data_url, "https://example.com/a.geojson");
//! ```

pub mod core;
pub mod error;
pub mod graph;
pub mod projection;
pub mod snapshot;

pub use crate::core::{
    EditorConfig, FakeIdGenerator, FakeTimeProvider, FileSnapshotStore, IdGenerator,
    MemorySnapshotStore, RealIdGenerator, RealTimeProvider, RuntimeContext, SnapshotStore,
    TimeProvider, UrlEditDebouncer, WorkflowEditor,
};
pub use crate::error::{WorkflowError, WorkflowResult};
pub use crate::graph::{
    apply_mutation, is_valid_connection, Connection, Edge, Graph, GraphMutation, LayerData, Node,
    NodeKind, NodeKindTag, Position, SourceData,
};
pub use crate::projection::{get_ordered_source_layer_pairs, SourceLayerPair};
pub use crate::snapshot::{
    load_snapshot, parse_snapshot, to_json, validate_graph, validate_snapshot, Diagnostic,
    DiagnosticLevel, SnapshotFormat, ValidationReport,
};
