use std::collections::HashSet;

use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::ArchitectureModel;

/// Relationship endpoints, parent ids and layout entries must all resolve.
/// One finding per dangling reference.
pub(super) fn check(model: &ArchitectureModel) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let element_ids: HashSet<&str> = model.elements.iter().map(|e| e.id.as_str()).collect();
    let relationship_ids: HashSet<&str> =
        model.relationships.iter().map(|r| r.id.as_str()).collect();

    for (i, rel) in model.relationships.iter().enumerate() {
        if !element_ids.contains(rel.source_id.as_str()) {
            out.push(Diagnostic::error(
                DiagnosticCode::InvalidReference,
                format!("Relationship source \"{}\" does not exist", rel.source_id),
                format!("relationships[{i}].sourceId"),
            ));
        }
        if !element_ids.contains(rel.target_id.as_str()) {
            out.push(Diagnostic::error(
                DiagnosticCode::InvalidReference,
                format!("Relationship target \"{}\" does not exist", rel.target_id),
                format!("relationships[{i}].targetId"),
            ));
        }
    }

    for (i, element) in model.elements.iter().enumerate() {
        if let Some(pid) = &element.parent_id {
            if !element_ids.contains(pid.as_str()) {
                out.push(Diagnostic::error(
                    DiagnosticCode::InvalidReference,
                    format!("Parent \"{}\" does not exist", pid),
                    format!("elements[{i}].parentId"),
                ));
            }
        }
    }

    for (i, view) in model.views.iter().enumerate() {
        let Some(layout) = &view.layout else {
            continue;
        };
        for (j, node) in layout.nodes.iter().enumerate() {
            if !element_ids.contains(node.element_id.as_str()) {
                out.push(Diagnostic::error(
                    DiagnosticCode::InvalidReference,
                    format!(
                        "Layout node references missing element \"{}\"",
                        node.element_id
                    ),
                    format!("views[{i}].layout.nodes[{j}].elementId"),
                ));
            }
        }
        for (j, edge) in layout.edges.iter().enumerate() {
            if !relationship_ids.contains(edge.relationship_id.as_str()) {
                out.push(Diagnostic::error(
                    DiagnosticCode::InvalidReference,
                    format!(
                        "Layout edge references missing relationship \"{}\"",
                        edge.relationship_id
                    ),
                    format!("views[{i}].layout.edges[{j}].relationshipId"),
                ));
            }
        }
    }

    out
}
