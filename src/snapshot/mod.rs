//! Snapshot codec and whole-graph checks.
//!
//! [`parse_snapshot`] is strict and meant for files a user hands us.
//! [`load_snapshot`] is the hydrate path for persisted state: it never fails
//! and substitutes empty lists for anything malformed.

pub mod parser;
pub mod validation;

pub use parser::{
    load_snapshot, parse_snapshot, parse_snapshot_value, sanitize_snapshot, to_json,
    SnapshotFormat,
};
pub use validation::{
    validate_graph, validate_snapshot, Diagnostic, DiagnosticLevel, ValidationReport,
};
