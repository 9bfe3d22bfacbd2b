use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed set of validation finding codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    DuplicateId,
    InvalidReference,
    InvalidHierarchy,
    MissingLayout,
    MissingCodeRef,
    InvalidCodeRef,
    DeprecatedField,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::DuplicateId => "DUPLICATE_ID",
            DiagnosticCode::InvalidReference => "INVALID_REFERENCE",
            DiagnosticCode::InvalidHierarchy => "INVALID_HIERARCHY",
            DiagnosticCode::MissingLayout => "MISSING_LAYOUT",
            DiagnosticCode::MissingCodeRef => "MISSING_CODE_REF",
            DiagnosticCode::InvalidCodeRef => "INVALID_CODE_REF",
            DiagnosticCode::DeprecatedField => "DEPRECATED_FIELD",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One validation finding. `path` locates the offending field, e.g. `elements[3].parentId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    pub path: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(
        code: DiagnosticCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

/// True if any finding is error-severity.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
