use crate::diagnostic::{has_errors, Diagnostic, DiagnosticCode};
use crate::elements::{find_root_landscape, implicit_landscape};
use crate::model::{ArchitectureModel, ElementKind};
use crate::validate::validate;

#[derive(Debug, Clone, PartialEq)]
pub struct Repaired {
    pub model: ArchitectureModel,
    /// Systems that were given the landscape as parent.
    pub reparented: Vec<String>,
    /// Landscape created by the repair, if one had to be made.
    pub created_landscape: Option<String>,
    /// Findings left after the repair.
    pub remaining: Vec<Diagnostic>,
}

fn is_system_landscape_finding(d: &Diagnostic) -> bool {
    d.code == DiagnosticCode::InvalidHierarchy
        && d.message.contains("system")
        && d.message.contains("landscape")
}

/// Best-effort fix for models recovered from storage: when a system lacks its
/// landscape parent, hang every unparented system under the top-level landscape
/// (creating one if needed).
///
/// This is the only fix applied. Whatever is still wrong afterwards is logged and
/// returned in `remaining`; nothing is raised.
pub fn repair_hierarchy(model: &ArchitectureModel, diagnostics: &[Diagnostic]) -> Repaired {
    if !diagnostics.iter().any(is_system_landscape_finding) {
        return Repaired {
            model: model.clone(),
            reparented: Vec::new(),
            created_landscape: None,
            remaining: diagnostics.to_vec(),
        };
    }

    let mut next = model.clone();
    let mut created_landscape = None;
    let landscape_id = match find_root_landscape(model) {
        Some(l) => l.id.clone(),
        None => {
            let landscape = implicit_landscape(model);
            let id = landscape.id.clone();
            next.elements.push(landscape);
            created_landscape = Some(id.clone());
            id
        }
    };

    let mut reparented = Vec::new();
    for element in next
        .elements
        .iter_mut()
        .filter(|e| e.kind == ElementKind::System && e.parent_id.is_none())
    {
        element.parent_id = Some(landscape_id.clone());
        reparented.push(element.id.clone());
    }
    tracing::info!(
        landscape = %landscape_id,
        created = created_landscape.is_some(),
        systems = reparented.len(),
        "re-parented orphaned systems"
    );

    let remaining = validate(&next);
    if has_errors(&remaining) {
        for d in &remaining {
            tracing::warn!(code = %d.code, path = %d.path, "{}", d.message);
        }
        tracing::warn!(count = remaining.len(), "model still has errors after repair");
    }

    Repaired {
        model: next,
        reparented,
        created_landscape,
        remaining,
    }
}
