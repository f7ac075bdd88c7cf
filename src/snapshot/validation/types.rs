//! Validation diagnostic types.

use serde::{Deserialize, Serialize};

/// Severity level of a validation diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: String,
    pub message: String,
    pub node_id: Option<String>,
    pub edge_id: Option<String>,
}

/// Aggregated result of snapshot validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let is_valid = diagnostics
            .iter()
            .all(|d| d.level != DiagnosticLevel::Error);
        Self {
            is_valid,
            diagnostics,
        }
    }

    /// Return only the error-level diagnostics.
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .collect()
    }

    /// Return only the warning-level diagnostics.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .collect()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }
}

pub(super) fn error(
    code: &str,
    message: String,
    node_id: Option<String>,
    edge_id: Option<String>,
) -> Diagnostic {
    Diagnostic {
        level: DiagnosticLevel::Error,
        code: code.to_string(),
        message,
        node_id,
        edge_id,
    }
}

pub(super) fn warn(
    code: &str,
    message: String,
    node_id: Option<String>,
    edge_id: Option<String>,
) -> Diagnostic {
    Diagnostic {
        level: DiagnosticLevel::Warning,
        code: code.to_string(),
        message,
        node_id,
        edge_id,
    }
}
