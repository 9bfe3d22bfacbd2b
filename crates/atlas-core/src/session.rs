use crate::diagnostic::Diagnostic;
use crate::model::ArchitectureModel;
use crate::repair::repair_hierarchy;
use crate::store::AutosaveStore;
use crate::validate::validate;

/// Where the editing session's starting model came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Autosave,
    Fresh,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub model: ArchitectureModel,
    pub diagnostics: Vec<Diagnostic>,
    pub origin: Origin,
    pub repaired: bool,
}

/// Start a session: the autosaved model if there is one, else a fresh skeleton.
/// A recovered model with findings goes through the repair helper; the returned
/// diagnostics are the ones left afterwards.
pub fn recover(store: &AutosaveStore, title: &str) -> Recovered {
    let Some(model) = store.load() else {
        return Recovered {
            model: ArchitectureModel::skeleton(title),
            diagnostics: Vec::new(),
            origin: Origin::Fresh,
            repaired: false,
        };
    };

    let diagnostics = validate(&model);
    if diagnostics.is_empty() {
        return Recovered {
            model,
            diagnostics,
            origin: Origin::Autosave,
            repaired: false,
        };
    }

    let fixed = repair_hierarchy(&model, &diagnostics);
    let repaired = fixed.model != model;
    Recovered {
        model: fixed.model,
        diagnostics: fixed.remaining,
        origin: Origin::Autosave,
        repaired,
    }
}
