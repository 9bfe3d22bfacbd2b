mod common;

use atlas_core::*;
use common::minimal_model;
use pretty_assertions::assert_eq;

fn codes(found: &[Diagnostic]) -> Vec<DiagnosticCode> {
    found.iter().map(|d| d.code).collect()
}

#[test]
fn minimal_model_is_valid() {
    assert_eq!(validate(&minimal_model()), vec![]);
}

#[test]
fn duplicate_element_ids() {
    let mut model = minimal_model();
    model.elements = vec![
        Element::new("duplicate", ElementKind::System, "A").with_parent("landscape-1"),
        Element::new("duplicate", ElementKind::Container, "B").with_parent("system-1"),
    ];
    model.relationships.clear();
    model.views[0].layout.as_mut().unwrap().nodes.clear();
    model.views[0].layout.as_mut().unwrap().edges.clear();

    let found = validate(&model);
    let dups: Vec<&Diagnostic> = found
        .iter()
        .filter(|d| d.code == DiagnosticCode::DuplicateId)
        .collect();
    assert_eq!(dups.len(), 1);
    assert!(dups[0].message.contains("duplicate"));
    assert_eq!(dups[0].path, "elements[1].id");
}

#[test]
fn dangling_relationship_endpoint_is_named() {
    let mut model = minimal_model();
    model.relationships[0].target_id = "missing-id".into();
    let found = validate(&model);
    assert_eq!(codes(&found), [DiagnosticCode::InvalidReference]);
    assert_eq!(found[0].path, "relationships[0].targetId");
    assert!(found[0].message.contains("missing-id"));
}

#[test]
fn dangling_parent_only_reports_the_reference() {
    let mut model = minimal_model();
    model.elements[1].parent_id = Some("landscape-9".into());
    let found = validate(&model);
    assert_eq!(codes(&found), [DiagnosticCode::InvalidReference]);
    assert_eq!(found[0].message, "Parent \"landscape-9\" does not exist");
}

#[test]
fn wrong_parent_kind_reports_expected_and_actual() {
    let mut model = minimal_model();
    model.elements[1].parent_id = Some("container-1".into());
    let found = validate(&model);
    assert_eq!(codes(&found), [DiagnosticCode::InvalidHierarchy]);
    assert!(found[0].message.contains("parent must be landscape"));
    assert!(found[0].message.contains("but got container"));
}

#[test]
fn code_ref_rules() {
    let mut model = minimal_model();
    model.elements[4].code_ref = None;
    let found = validate(&model);
    assert_eq!(codes(&found), [DiagnosticCode::MissingCodeRef]);

    let mut model = minimal_model();
    model.elements[2] = model.elements[2]
        .clone()
        .with_code_ref(CodeRefKind::File, "test.rs");
    let found = validate(&model);
    assert_eq!(codes(&found), [DiagnosticCode::InvalidCodeRef]);
    assert_eq!(found[0].path, "elements[2].codeRef");
}

#[test]
fn module_and_symbol_code_refs_are_accepted() {
    for kind in [CodeRefKind::Module, CodeRefKind::Symbol] {
        let mut model = minimal_model();
        model.elements[4].code_ref = Some(CodeRef {
            kind,
            reference: "OrderProcessor".into(),
            repo_hint: Some("backend-monorepo".into()),
        });
        assert!(validate(&model).is_empty());
    }
}

#[test]
fn missing_layout_is_reported_once() {
    let mut model = minimal_model();
    model.views[0].layout = None;
    let found = validate(&model);
    let missing: Vec<&Diagnostic> = found
        .iter()
        .filter(|d| d.code == DiagnosticCode::MissingLayout)
        .collect();
    assert_eq!(missing.len(), 1);
    assert!(missing[0].message.contains("algorithm, nodes, and edges"));
}

#[test]
fn missing_layout_from_json() {
    let mut json = serde_json::to_value(minimal_model()).unwrap();
    json["views"][0].as_object_mut().unwrap().remove("layout");
    let model: ArchitectureModel = serde_json::from_value(json).unwrap();
    assert_eq!(codes(&validate(&model)), [DiagnosticCode::MissingLayout]);
}

#[test]
fn one_element_can_trip_several_rules() {
    let mut model = minimal_model();
    let mut stray = Element::new("system-1", ElementKind::Code, "stray");
    stray.parent_id = Some("ghost".into());
    model.elements.push(stray);
    assert_eq!(
        codes(&validate(&model)),
        [
            DiagnosticCode::DuplicateId,
            DiagnosticCode::InvalidReference,
            DiagnosticCode::MissingCodeRef,
        ]
    );
}

#[test]
fn validation_is_repeatable() {
    let mut model = minimal_model();
    model.views[0].layout = None;
    model.elements[3].parent_id = None;
    model.relationships[0].source_id = "nobody".into();
    let first = serde_json::to_string(&validate(&model)).unwrap();
    let second = serde_json::to_string(&validate(&model)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn constraints_are_not_checked() {
    let mut model = minimal_model();
    model.constraints[0].scope.insert("elementId".into(), "nowhere".into());
    assert!(validate(&model).is_empty());
}

#[test]
fn deprecated_label_is_linted_separately() {
    let mut model = minimal_model();
    model.relationships[0].label = Some("uses".into());
    assert!(validate(&model).is_empty());
    let lints = lint_deprecated(&model);
    assert_eq!(codes(&lints), [DiagnosticCode::DeprecatedField]);
    assert_eq!(lints[0].severity, Severity::Warning);
}

#[test]
fn repeated_id_parents_resolve_to_the_later_element() {
    let mut model = minimal_model();
    model.elements = vec![
        Element::new("l", ElementKind::Landscape, "L"),
        Element::new("x", ElementKind::System, "X").with_parent("l"),
        Element::new("x", ElementKind::Container, "X again").with_parent("x"),
        Element::new("k", ElementKind::Container, "K").with_parent("x"),
    ];
    model.relationships.clear();
    let layout = model.views[0].layout.as_mut().unwrap();
    layout.nodes.clear();
    layout.edges.clear();

    let found: Vec<String> = validate(&model).iter().map(ToString::to_string).collect();
    assert_eq!(
        found,
        [
            "[DUPLICATE_ID] elements[2].id: Element ID \"x\" is not unique",
            "[INVALID_HIERARCHY] elements[2].parentId: container element \"x\" parent must be system, but got container",
            "[INVALID_HIERARCHY] elements[3].parentId: container element \"k\" parent must be system, but got container",
        ]
    );
}
