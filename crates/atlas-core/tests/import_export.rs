mod common;

use atlas_core::import::{export_file_name, export_model, import_model};
use atlas_core::*;
use common::minimal_model;
use pretty_assertions::assert_eq;

fn with(field: &str, value: serde_json::Value) -> String {
    let mut json = serde_json::to_value(minimal_model()).unwrap();
    json[field] = value;
    json.to_string()
}

#[test]
fn unknown_schema_version_is_rejected() {
    let err = import_model(&with("schemaVersion", "999.0.0".into())).unwrap_err();
    assert!(matches!(err, ImportError::UnknownSchemaVersion(ref v) if v == "999.0.0"));
    assert!(err.to_string().contains("Unknown schemaVersion"));
}

#[test]
fn missing_schema_version_is_rejected() {
    let mut json = serde_json::to_value(minimal_model()).unwrap();
    json.as_object_mut().unwrap().remove("schemaVersion");
    let err = import_model(&json.to_string()).unwrap_err();
    assert!(err.to_string().contains("Missing schemaVersion"));
}

#[test]
fn unknown_top_level_fields_are_rejected() {
    let err = import_model(&with("extraField", "boom".into())).unwrap_err();
    assert_eq!(err.to_string(), "Unknown fields in model: extraField");
}

#[test]
fn version_is_checked_before_fields() {
    let mut json = serde_json::to_value(minimal_model()).unwrap();
    json["schemaVersion"] = "2.0.0".into();
    json["extra"] = true.into();
    let err = import_model(&json.to_string()).unwrap_err();
    assert!(matches!(err, ImportError::UnknownSchemaVersion(_)));
}

#[test]
fn malformed_text_is_a_parse_error() {
    let err = import_model("{ not json").unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse JSON"));
    assert!(matches!(import_model("[]"), Err(ImportError::NotAnObject)));
}

#[test]
fn import_does_not_run_semantic_checks() {
    let mut model = minimal_model();
    model.views[0].layout = None;
    let imported = import_model(&export_model(&model).unwrap()).unwrap();
    assert_eq!(validate(&imported)[0].code, DiagnosticCode::MissingLayout);
}

#[test]
fn export_then_import_preserves_the_model() {
    let mut model = minimal_model();
    model.elements[0]
        .attributes
        .get_or_insert_with(Default::default)
        .insert("owner".into(), serde_json::json!({ "team": "platform" }));
    let back = import_model(&export_model(&model).unwrap()).unwrap();
    assert_eq!(back, model);
}

#[test]
fn code_ref_keeps_its_wire_name() {
    let json = export_model(&minimal_model()).unwrap();
    assert!(json.contains(r#""ref": "src/checkout.rs""#));
    assert!(json.contains(r#""w": 120.0"#));
}

#[test]
fn file_name_from_title() {
    assert_eq!(export_file_name("Payment Platform"), "payment-platform.arch.json");
    assert_eq!(export_file_name("  Orders  "), "orders.arch.json");
}

#[test]
fn schema_names_every_model_field() {
    let schema = serde_json::to_value(model_schema()).unwrap();
    let props = schema["properties"].as_object().unwrap();
    for field in atlas_core::import::MODEL_FIELDS {
        assert!(props.contains_key(field), "schema lacks {field}");
    }
}
