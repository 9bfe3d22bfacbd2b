use serde_json::Value;

use crate::error::ImportError;
use crate::model::{ArchitectureModel, KNOWN_SCHEMA_VERSIONS};

/// The only top-level fields a model file may have.
pub const MODEL_FIELDS: [&str; 6] = [
    "schemaVersion",
    "metadata",
    "elements",
    "relationships",
    "constraints",
    "views",
];

/// Parse model JSON under the strict import policy: a known `schemaVersion` and no
/// unknown top-level fields. Semantic problems are not checked here; run `validate`.
pub fn import_model(json: &str) -> Result<ArchitectureModel, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(map) = &value else {
        return Err(ImportError::NotAnObject);
    };

    let version = match map.get("schemaVersion") {
        None | Some(Value::Null) => return Err(ImportError::MissingSchemaVersion),
        Some(Value::String(v)) if v.is_empty() => return Err(ImportError::MissingSchemaVersion),
        Some(Value::String(v)) => v.clone(),
        Some(other) => other.to_string(),
    };
    if !KNOWN_SCHEMA_VERSIONS.contains(&version.as_str()) {
        return Err(ImportError::UnknownSchemaVersion(version));
    }

    let unknown: Vec<String> = map
        .keys()
        .filter(|k| !MODEL_FIELDS.contains(&k.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(ImportError::UnknownFields(unknown));
    }

    Ok(serde_json::from_value(value)?)
}

pub fn export_model(model: &ArchitectureModel) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(model)
}

/// "Payment Platform" -> "payment-platform.arch.json"
pub fn export_file_name(title: &str) -> String {
    let slug: Vec<String> = title
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();
    format!("{}.arch.json", slug.join("-"))
}
