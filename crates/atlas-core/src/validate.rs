use crate::diagnostic::Diagnostic;
use crate::model::ArchitectureModel;
use crate::rules::RULES;

/// Run every rule in order and concatenate the findings.
///
/// No deduplication and no short-circuiting: one element can appear in findings from
/// several rules. An empty result means the model is valid.
pub fn validate(model: &ArchitectureModel) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for (name, rule) in RULES {
        let found = rule(model);
        tracing::trace!(rule = name, count = found.len(), "rule finished");
        out.extend(found);
    }
    tracing::debug!(
        elements = model.elements.len(),
        relationships = model.relationships.len(),
        views = model.views.len(),
        diagnostics = out.len(),
        "validated model"
    );
    out
}
