//! Workflow-level error types.

use thiserror::Error;

/// Workflow-level errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Snapshot parse error: {0}")]
    SnapshotParseError(String),
    #[error("Snapshot serialize error: {0}")]
    SnapshotSerializeError(String),
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for WorkflowError {
    fn from(e: serde_json::Error) -> Self {
        WorkflowError::SnapshotParseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_error_display() {
        assert_eq!(
            WorkflowError::SnapshotParseError("x".into()).to_string(),
            "Snapshot parse error: x"
        );
        assert_eq!(
            WorkflowError::SnapshotSerializeError("s".into()).to_string(),
            "Snapshot serialize error: s"
        );
        assert_eq!(
            WorkflowError::UnknownNodeType("group".into()).to_string(),
            "Unknown node type: group"
        );
        assert_eq!(
            WorkflowError::ConfigError("c".into()).to_string(),
            "Config error: c"
        );
    }

    #[test]
    fn test_workflow_error_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{{").unwrap_err();
        let wf_err: WorkflowError = err.into();
        assert!(matches!(wf_err, WorkflowError::SnapshotParseError(_)));
    }

    #[test]
    fn test_workflow_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let wf_err: WorkflowError = io.into();
        assert!(wf_err.to_string().contains("missing.json"));
    }
}
