//! Error types for the workflow graph crate.
//!
//! Graph operations themselves never fail: rejected edits are no-ops and
//! malformed elements are filtered out. [`WorkflowError`] covers the edges of
//! the crate where text comes in or goes out (snapshot codec, configuration).

pub mod workflow_error;

pub use workflow_error::WorkflowError;

/// Convenience alias for workflow-level results.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
