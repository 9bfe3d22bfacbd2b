use std::collections::HashSet;

pub mod diagnostic;
pub mod elements;
pub mod error;
pub mod events;
pub mod import;
pub mod layout;
pub mod levels;
pub mod model;
pub mod relationships;
pub mod repair;
pub mod rules;
pub mod session;
pub mod settings;
pub mod store;
mod validate;

pub use diagnostic::{has_errors, Diagnostic, DiagnosticCode, Severity};
pub use error::{ImportError, MutationError, StoreError};
pub use layout::{compute_layout, semantic_zoom_level, LayoutOptions};
pub use model::*;
pub use relationships::{add_relationship_to_model, remove_relationship_from_model, AddRelationship};
pub use repair::{repair_hierarchy, Repaired};
pub use rules::lint_deprecated;
pub use validate::validate;

// --- Ids ---

/// Next `{prefix}-{N}` id, with N one past the highest in use. Elements and
/// relationships share the namespace, so both are scanned. When the highest suffix is
/// `u64::MAX`, the lowest free suffix is used instead.
pub fn next_id(model: &ArchitectureModel, prefix: &str) -> String {
    let lead = format!("{prefix}-");
    let ids: HashSet<&str> = model
        .elements
        .iter()
        .map(|e| e.id.as_str())
        .chain(model.relationships.iter().map(|r| r.id.as_str()))
        .collect();
    let max = ids
        .iter()
        .filter_map(|id| id.strip_prefix(lead.as_str()).and_then(|s| s.parse::<u64>().ok()))
        .max()
        .unwrap_or(0);
    if let Some(n) = max.checked_add(1) {
        return format!("{prefix}-{n}");
    }
    (1..=u64::MAX)
        .map(|n| format!("{prefix}-{n}"))
        .find(|candidate| !ids.contains(candidate.as_str()))
        .unwrap_or_else(|| format!("{prefix}-{}-1", u64::MAX))
}

/// Mutable layout of a view, or why there is none.
pub(crate) fn view_layout_mut<'a>(
    model: &'a mut ArchitectureModel,
    view_id: &str,
) -> Result<&'a mut LayoutState, MutationError> {
    let view = model
        .views
        .iter_mut()
        .find(|v| v.id == view_id)
        .ok_or_else(|| MutationError::ViewNotFound(view_id.to_string()))?;
    view.layout
        .as_mut()
        .ok_or_else(|| MutationError::ViewHasNoLayout(view_id.to_string()))
}
