use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;

/// Schema version written by this crate.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Versions accepted on import. Anything else is rejected outright.
pub const KNOWN_SCHEMA_VERSIONS: &[&str] = &[SCHEMA_VERSION];

/// Layout algorithm tag used for new views.
pub const DEFAULT_ALGORITHM: &str = "deterministic-v1";

/// Free-form JSON carried through unchanged. Never interpreted by the core.
pub type Opaque = BTreeMap<String, serde_json::Value>;

// --- Hierarchy ---

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Landscape,
    System,
    Container,
    Component,
    Code,
}

impl ElementKind {
    /// All kinds, root first.
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Landscape,
        ElementKind::System,
        ElementKind::Container,
        ElementKind::Component,
        ElementKind::Code,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Landscape => "landscape",
            ElementKind::System => "system",
            ElementKind::Container => "container",
            ElementKind::Component => "component",
            ElementKind::Code => "code",
        }
    }

    /// The only kind an element of this kind may be parented under.
    /// `None` for the root.
    pub fn parent_kind(self) -> Option<ElementKind> {
        match self {
            ElementKind::Landscape => None,
            ElementKind::System => Some(ElementKind::Landscape),
            ElementKind::Container => Some(ElementKind::System),
            ElementKind::Component => Some(ElementKind::Container),
            ElementKind::Code => Some(ElementKind::Component),
        }
    }

    /// The next level down, `None` for the leaf.
    pub fn child_kind(self) -> Option<ElementKind> {
        match self {
            ElementKind::Landscape => Some(ElementKind::System),
            ElementKind::System => Some(ElementKind::Container),
            ElementKind::Container => Some(ElementKind::Component),
            ElementKind::Component => Some(ElementKind::Code),
            ElementKind::Code => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Elements ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CodeRefKind {
    Module,
    File,
    Symbol,
}

/// Pointer from a code-level element to a source artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeRef {
    pub kind: CodeRefKind,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Opaque>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_ref: Option<CodeRef>,
    /// Containers only, e.g. "Spring Boot". Advisory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    /// Components only, e.g. "Repository". Advisory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            description: None,
            parent_id: None,
            tags: None,
            attributes: None,
            code_ref: None,
            technology: None,
            component_type: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_code_ref(mut self, kind: CodeRefKind, reference: impl Into<String>) -> Self {
        self.code_ref = Some(CodeRef {
            kind,
            reference: reference.into(),
            repo_hint: None,
        });
        self
    }
}

// --- Relationships ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(rename = "type")]
    pub relationship_type: String,
    /// Superseded by `action`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// What the arrow does, e.g. "Fetches data".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Transport or protocol, e.g. "REST API".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relationship_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            relationship_type: relationship_type.into(),
            label: None,
            action: None,
            integration_mode: None,
            description: None,
            tags: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub id: String,
    #[serde(rename = "type")]
    pub constraint_type: String,
    #[serde(default)]
    pub scope: Opaque,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Opaque>,
    pub severity: Severity,
}

// --- Views ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub element_id: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "w", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(rename = "h", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub relationship_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Opaque>,
}

impl LayoutEdge {
    pub fn new(relationship_id: impl Into<String>) -> Self {
        Self {
            relationship_id: relationship_id.into(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutState {
    /// Descriptive tag only; does not change how positions are computed.
    pub algorithm: String,
    #[serde(default)]
    pub nodes: Vec<LayoutNode>,
    #[serde(default)]
    pub edges: Vec<LayoutEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Opaque>,
}

impl LayoutState {
    pub fn empty(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub id: String,
    pub level: ElementKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Opaque>,
    /// Required. Kept optional here so a missing layout is reported, not rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutState>,
}

// --- Model ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureModel {
    pub schema_version: String,
    pub metadata: Metadata,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub views: Vec<View>,
}

impl ArchitectureModel {
    /// A fresh model: no elements, one empty system-context view.
    pub fn skeleton(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            metadata: Metadata {
                title: title.into(),
                description: Some("Created with Arch Atlas".to_string()),
                created_at: Some(now.clone()),
                updated_at: Some(now),
            },
            elements: Vec::new(),
            relationships: Vec::new(),
            constraints: Vec::new(),
            views: vec![View {
                id: "view-1".to_string(),
                level: ElementKind::System,
                title: "System Context".to_string(),
                filter: None,
                layout: Some(LayoutState::empty(DEFAULT_ALGORITHM)),
            }],
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    pub fn view(&self, id: &str) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }
}

/// Model JSON Schema, as served to agents and editors.
pub fn model_schema() -> schemars::Schema {
    schemars::schema_for!(ArchitectureModel)
}
