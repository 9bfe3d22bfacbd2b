use thiserror::Error;

/// Structural rejection of imported JSON. Nothing is accepted into the system when
/// one of these is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Model must be a JSON object")]
    NotAnObject,
    #[error("Missing schemaVersion field")]
    MissingSchemaVersion,
    #[error("Unknown schemaVersion: {0}")]
    UnknownSchemaVersion(String),
    #[error("Unknown fields in model: {}", .0.join(", "))]
    UnknownFields(Vec<String>),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("model '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// A mutation that names something the model does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("View '{0}' not found")]
    ViewNotFound(String),
    #[error("View '{0}' has no layout")]
    ViewHasNoLayout(String),
    #[error("Element '{0}' not found")]
    ElementNotFound(String),
    #[error("Relationship '{0}' not found")]
    RelationshipNotFound(String),
}
