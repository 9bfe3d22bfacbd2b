use std::collections::HashSet;

use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::ArchitectureModel;

/// Element and relationship ids share one namespace. The first occurrence of an id
/// wins; every later occurrence is reported at its own path.
pub(super) fn check(model: &ArchitectureModel) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (i, element) in model.elements.iter().enumerate() {
        if !seen.insert(element.id.as_str()) {
            out.push(Diagnostic::error(
                DiagnosticCode::DuplicateId,
                format!("Element ID \"{}\" is not unique", element.id),
                format!("elements[{i}].id"),
            ));
        }
    }

    for (i, rel) in model.relationships.iter().enumerate() {
        if !seen.insert(rel.id.as_str()) {
            out.push(Diagnostic::error(
                DiagnosticCode::DuplicateId,
                format!("Relationship ID \"{}\" is not unique", rel.id),
                format!("relationships[{i}].id"),
            ));
        }
    }

    out
}
