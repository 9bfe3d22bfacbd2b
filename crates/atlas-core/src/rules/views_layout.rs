use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::ArchitectureModel;

/// Every view carries a layout.
pub(super) fn check(model: &ArchitectureModel) -> Vec<Diagnostic> {
    model
        .views
        .iter()
        .enumerate()
        .filter(|(_, view)| view.layout.is_none())
        .map(|(i, view)| {
            Diagnostic::error(
                DiagnosticCode::MissingLayout,
                format!(
                    "View \"{}\" is missing required layout. Add a layout object with algorithm, nodes, and edges.",
                    view.id
                ),
                format!("views[{i}].layout"),
            )
        })
        .collect()
}
