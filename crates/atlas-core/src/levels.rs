//! Drill-down navigation across the hierarchy.

use crate::model::{ArchitectureModel, Element, ElementKind};

pub fn can_drill_down(level: ElementKind) -> bool {
    level.child_kind().is_some()
}

pub fn can_drill_up(level: ElementKind) -> bool {
    level.parent_kind().is_some()
}

/// Kind of element a user adds while looking at `level`.
pub fn kind_added_at(level: ElementKind) -> ElementKind {
    level.child_kind().unwrap_or(ElementKind::Code)
}

pub fn diagram_title(level: ElementKind, focus_name: Option<&str>) -> String {
    let base = match level {
        ElementKind::Landscape => "System Landscape",
        ElementKind::System => "System Context",
        ElementKind::Container => "Container Diagram",
        ElementKind::Component => "Component Diagram",
        ElementKind::Code => "Code Diagram",
    };
    match focus_name {
        Some(name) => format!("{base}: {name}"),
        None => base.to_string(),
    }
}

/// Elements shown at `level`: the focused element's children when drilled in, every
/// system at the landscape level, otherwise unparented elements of the level's kind.
///
/// This is the filter to apply before `compute_layout`.
pub fn visible_elements<'a>(
    model: &'a ArchitectureModel,
    level: ElementKind,
    focus: Option<&str>,
) -> Vec<&'a Element> {
    if let Some(focus) = focus {
        return model
            .elements
            .iter()
            .filter(|e| e.parent_id.as_deref() == Some(focus))
            .collect();
    }
    if level == ElementKind::Landscape {
        return model
            .elements
            .iter()
            .filter(|e| e.kind == ElementKind::System)
            .collect();
    }
    let kind = kind_added_at(level);
    model
        .elements
        .iter()
        .filter(|e| e.kind == kind && e.parent_id.is_none())
        .collect()
}

/// A copy of `model` holding only the visible elements, ready for `compute_layout`.
pub fn scoped_model(
    model: &ArchitectureModel,
    level: ElementKind,
    focus: Option<&str>,
) -> ArchitectureModel {
    let elements = visible_elements(model, level, focus)
        .into_iter()
        .cloned()
        .collect();
    ArchitectureModel {
        elements,
        ..model.clone()
    }
}
