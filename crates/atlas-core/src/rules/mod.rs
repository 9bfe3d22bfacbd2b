//! Validation rules. Each rule is a pure function over the whole model; none of them
//! repairs anything.

mod deprecated;
mod hierarchy;
mod ids;
mod references;
mod views_layout;

use crate::diagnostic::Diagnostic;
use crate::model::ArchitectureModel;

pub use deprecated::lint_deprecated;

/// A rule: model in, findings out.
pub type Rule = fn(&ArchitectureModel) -> Vec<Diagnostic>;

/// The rules `validate` runs, in the order their findings are reported.
pub const RULES: [(&str, Rule); 4] = [
    ("ids", ids::check),
    ("references", references::check),
    ("hierarchy", hierarchy::check),
    ("views-layout", views_layout::check),
];
