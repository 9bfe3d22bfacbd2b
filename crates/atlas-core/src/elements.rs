use std::collections::HashSet;

use crate::error::MutationError;
use crate::layout::{NODE_HEIGHT, NODE_WIDTH};
use crate::model::{ArchitectureModel, Element, ElementKind, LayoutNode};

pub const IMPLICIT_LANDSCAPE_NAME: &str = "Architecture Landscape";
pub const IMPLICIT_LANDSCAPE_DESCRIPTION: &str = "Top-level architecture landscape";

#[derive(Debug, Clone, PartialEq)]
pub struct AddElement {
    pub kind: ElementKind,
    /// Defaults to "New <kind>".
    pub name: Option<String>,
    /// Element currently drilled into; becomes the parent.
    pub focus: Option<String>,
    /// View that gets a node for the new element. Defaults to the first view.
    pub view_id: Option<String>,
}

/// The top-level landscape, if the model has one.
pub fn find_root_landscape(model: &ArchitectureModel) -> Option<&Element> {
    model
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::Landscape && e.parent_id.is_none())
}

/// A new landscape element with the next free `landscape-N` id.
pub fn implicit_landscape(model: &ArchitectureModel) -> Element {
    let mut landscape = Element::new(
        crate::next_id(model, "landscape"),
        ElementKind::Landscape,
        IMPLICIT_LANDSCAPE_NAME,
    );
    landscape.description = Some(IMPLICIT_LANDSCAPE_DESCRIPTION.to_string());
    landscape
}

/// Add an element and give it a staggered node on the target view.
///
/// With a focus, the focus becomes the parent. A top-level system is placed under the
/// model's landscape, which is created first when there is none. Returns the new model
/// and the new element's id.
pub fn add_element(
    model: &ArchitectureModel,
    request: AddElement,
) -> Result<(ArchitectureModel, String), MutationError> {
    let mut next = model.clone();
    let mut element = Element::new(
        crate::next_id(model, "elem"),
        request.kind,
        request
            .name
            .unwrap_or_else(|| format!("New {}", request.kind)),
    );
    element.description = Some(String::new());

    if let Some(focus) = request.focus {
        if model.element(&focus).is_none() {
            return Err(MutationError::ElementNotFound(focus));
        }
        element.parent_id = Some(focus);
    } else if request.kind == ElementKind::System {
        let landscape_id = match find_root_landscape(model) {
            Some(l) => l.id.clone(),
            None => {
                let landscape = implicit_landscape(model);
                let id = landscape.id.clone();
                next.elements.push(landscape);
                id
            }
        };
        element.parent_id = Some(landscape_id);
    }

    let id = element.id.clone();
    next.elements.push(element);
    let n = next.elements.len() as f64;

    let view_id = match request.view_id {
        Some(v) => Some(v),
        None => next.views.first().map(|v| v.id.clone()),
    };
    if let Some(view_id) = view_id {
        crate::view_layout_mut(&mut next, &view_id)?.nodes.push(LayoutNode {
            element_id: id.clone(),
            x: 100.0 + n * 30.0,
            y: 100.0 + n * 20.0,
            width: Some(NODE_WIDTH),
            height: Some(NODE_HEIGHT),
            collapsed: None,
        });
    }

    Ok((next, id))
}

/// Replace an element by id, or append it when the id is new.
pub fn save_element(model: &ArchitectureModel, element: Element) -> ArchitectureModel {
    let mut next = model.clone();
    match next.elements.iter_mut().find(|e| e.id == element.id) {
        Some(slot) => *slot = element,
        None => next.elements.push(element),
    }
    next
}

/// Remove elements with all their descendants, every relationship touching them, and
/// every layout node and edge that pointed at something removed.
pub fn delete_elements(model: &ArchitectureModel, ids: &[String]) -> ArchitectureModel {
    let mut doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let mut changed = true;
    while changed {
        changed = false;
        for e in &model.elements {
            if let Some(pid) = &e.parent_id {
                if doomed.contains(pid.as_str()) && doomed.insert(e.id.as_str()) {
                    changed = true;
                }
            }
        }
    }

    let dropped_rels: HashSet<&str> = model
        .relationships
        .iter()
        .filter(|r| doomed.contains(r.source_id.as_str()) || doomed.contains(r.target_id.as_str()))
        .map(|r| r.id.as_str())
        .collect();

    let mut next = model.clone();
    next.elements.retain(|e| !doomed.contains(e.id.as_str()));
    next.relationships
        .retain(|r| !dropped_rels.contains(r.id.as_str()));
    for layout in next.views.iter_mut().filter_map(|v| v.layout.as_mut()) {
        layout
            .nodes
            .retain(|n| !doomed.contains(n.element_id.as_str()));
        layout
            .edges
            .retain(|e| !dropped_rels.contains(e.relationship_id.as_str()));
    }

    tracing::debug!(
        elements = model.elements.len() - next.elements.len(),
        relationships = dropped_rels.len(),
        "deleted elements"
    );
    next
}

/// Put an element's node at (x, y) on a view, adding a node if it has none there.
pub fn move_element(
    model: &ArchitectureModel,
    view_id: &str,
    element_id: &str,
    x: f64,
    y: f64,
) -> Result<ArchitectureModel, MutationError> {
    if model.element(element_id).is_none() {
        return Err(MutationError::ElementNotFound(element_id.to_string()));
    }
    let mut next = model.clone();
    let layout = crate::view_layout_mut(&mut next, view_id)?;
    match layout.nodes.iter_mut().find(|n| n.element_id == element_id) {
        Some(node) => {
            node.x = x;
            node.y = y;
        }
        None => layout.nodes.push(LayoutNode {
            element_id: element_id.to_string(),
            x,
            y,
            width: Some(NODE_WIDTH),
            height: Some(NODE_HEIGHT),
            collapsed: None,
        }),
    }
    Ok(next)
}
