use std::collections::HashMap;

use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::{ArchitectureModel, Element, ElementKind};

/// Parent kinds and codeRef placement.
///
/// A parent id that does not resolve is left to the reference rule: no hierarchy
/// finding is produced for it here. When ids repeat, the last element with the id is
/// the one parents resolve to.
pub(super) fn check(model: &ArchitectureModel) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let by_id: HashMap<&str, &Element> = model
        .elements
        .iter()
        .map(|e| (e.id.as_str(), e))
        .collect();

    for (i, element) in model.elements.iter().enumerate() {
        let Some(expected) = element.kind.parent_kind() else {
            if element.parent_id.is_some() {
                out.push(Diagnostic::error(
                    DiagnosticCode::InvalidHierarchy,
                    format!(
                        "{} element \"{}\" should not have a parent",
                        element.kind, element.id
                    ),
                    format!("elements[{i}].parentId"),
                ));
            }
            check_code_ref(element, i, &mut out);
            continue;
        };

        check_code_ref(element, i, &mut out);

        let Some(pid) = &element.parent_id else {
            out.push(Diagnostic::error(
                DiagnosticCode::InvalidHierarchy,
                format!(
                    "{} element \"{}\" must have a parent of kind \"{}\"",
                    element.kind, element.id, expected
                ),
                format!("elements[{i}].parentId"),
            ));
            continue;
        };

        if let Some(parent) = by_id.get(pid.as_str()) {
            if parent.kind != expected {
                out.push(Diagnostic::error(
                    DiagnosticCode::InvalidHierarchy,
                    format!(
                        "{} element \"{}\" parent must be {}, but got {}",
                        element.kind, element.id, expected, parent.kind
                    ),
                    format!("elements[{i}].parentId"),
                ));
            }
        }
    }

    out
}

/// codeRef is required on code elements and forbidden everywhere else.
fn check_code_ref(element: &Element, i: usize, out: &mut Vec<Diagnostic>) {
    match (element.kind, &element.code_ref) {
        (ElementKind::Code, None) => out.push(Diagnostic::error(
            DiagnosticCode::MissingCodeRef,
            format!("Code element \"{}\" must have a codeRef", element.id),
            format!("elements[{i}].codeRef"),
        )),
        (ElementKind::Code, Some(_)) | (_, None) => {}
        (kind, Some(_)) => out.push(Diagnostic::error(
            DiagnosticCode::InvalidCodeRef,
            format!("{} element \"{}\" should not have a codeRef", kind, element.id),
            format!("elements[{i}].codeRef"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CodeRefKind;
    use crate::rules::fixture::valid_model;

    #[test]
    fn valid_chain_passes() {
        assert!(check(&valid_model()).is_empty());
    }

    #[test]
    fn wrong_parent_kind_names_both_kinds() {
        let mut model = valid_model();
        model.elements[2].parent_id = Some("landscape-1".into());
        let found = check(&model);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, DiagnosticCode::InvalidHierarchy);
        assert!(found[0]
            .message
            .contains("parent must be system, but got landscape"));
    }

    #[test]
    fn landscape_must_be_root() {
        let mut model = valid_model();
        model.elements[0].parent_id = Some("system-1".into());
        let found = check(&model);
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("should not have a parent"));
    }

    #[test]
    fn missing_parent_stops_further_checks() {
        let mut model = valid_model();
        model.elements[3].parent_id = None;
        let found = check(&model);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].message,
            "component element \"component-1\" must have a parent of kind \"container\""
        );
    }

    #[test]
    fn dangling_parent_is_not_a_hierarchy_finding() {
        let mut model = valid_model();
        model.elements[1].parent_id = Some("nowhere".into());
        assert!(check(&model).is_empty());
    }

    #[test]
    fn repeated_parent_id_resolves_to_the_last_element() {
        let mut model = valid_model();
        model.elements = vec![
            Element::new("l", ElementKind::Landscape, "L"),
            Element::new("x", ElementKind::System, "X").with_parent("l"),
            Element::new("x", ElementKind::Container, "X again").with_parent("x"),
            Element::new("k", ElementKind::Container, "K").with_parent("x"),
        ];
        let found = check(&model);
        let paths: Vec<&str> = found.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, ["elements[2].parentId", "elements[3].parentId"]);
        assert_eq!(
            found[0].message,
            "container element \"x\" parent must be system, but got container"
        );
        assert_eq!(
            found[1].message,
            "container element \"k\" parent must be system, but got container"
        );
    }

    #[test]
    fn code_ref_presence_follows_kind() {
        let mut model = valid_model();
        model.elements[4].code_ref = None;
        model.elements[2] = model.elements[2]
            .clone()
            .with_code_ref(CodeRefKind::Module, "api");
        let codes: Vec<DiagnosticCode> = check(&model).into_iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            [DiagnosticCode::InvalidCodeRef, DiagnosticCode::MissingCodeRef]
        );
    }

    #[test]
    fn landscape_with_code_ref_is_flagged() {
        let mut model = valid_model();
        model.elements[0] = model.elements[0]
            .clone()
            .with_code_ref(CodeRefKind::Symbol, "World");
        let found = check(&model);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, DiagnosticCode::InvalidCodeRef);
    }
}
