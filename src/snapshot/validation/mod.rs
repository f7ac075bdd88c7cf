mod matching;
mod structure;
mod types;

use crate::graph::Graph;
use crate::snapshot::parser::{parse_snapshot, SnapshotFormat};

pub use types::{Diagnostic, DiagnosticLevel, ValidationReport};

/// Parse `content` and report every invariant violation in it.
pub fn validate_snapshot(content: &str, format: SnapshotFormat) -> ValidationReport {
    match parse_snapshot(content, format) {
        Ok(graph) => validate_graph(&graph),
        Err(err) => ValidationReport::from_diagnostics(vec![Diagnostic {
            level: DiagnosticLevel::Error,
            code: "E001".to_string(),
            message: err.to_string(),
            node_id: None,
            edge_id: None,
        }]),
    }
}

/// Check a graph against the connection invariants.
///
/// Graphs built only through the mutator always pass; this is for snapshots
/// that arrive from storage or files.
pub fn validate_graph(graph: &Graph) -> ValidationReport {
    let mut diagnostics = structure::validate(graph);
    diagnostics.extend(matching::validate(graph));
    ValidationReport::from_diagnostics(diagnostics)
}
