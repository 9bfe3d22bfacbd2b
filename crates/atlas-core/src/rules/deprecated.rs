use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::ArchitectureModel;

/// Warnings for fields kept only for old files. Not part of `validate`, so a model
/// using them still validates clean.
pub fn lint_deprecated(model: &ArchitectureModel) -> Vec<Diagnostic> {
    model
        .relationships
        .iter()
        .enumerate()
        .filter(|(_, rel)| rel.label.is_some())
        .map(|(i, rel)| {
            Diagnostic::warning(
                DiagnosticCode::DeprecatedField,
                format!(
                    "Relationship \"{}\" uses deprecated field \"label\"; move its text to \"action\"",
                    rel.id
                ),
                format!("relationships[{i}].label"),
            )
        })
        .collect()
}
