use atlas_core::elements::{add_element, delete_elements, move_element, AddElement};
use atlas_core::import::{export_model, import_model};
use atlas_core::layout::zoom_range;
use atlas_core::levels::{diagram_title, scoped_model};
use atlas_core::settings::read_settings;
use atlas_core::store::ModelLibrary;
use atlas_core::{
    add_relationship_to_model, compute_layout, lint_deprecated, model_schema,
    remove_relationship_from_model, repair_hierarchy, semantic_zoom_level, validate,
    AddRelationship, ArchitectureModel, Diagnostic, ElementKind, LayoutOptions,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

// --- Request types ---

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct ModelNameRequest {
    /// Name of the model (file stem in the model library)
    name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct SetModelRequest {
    /// Name of the model to create or overwrite
    name: String,
    /// The complete model as a JSON string. Must carry a known schemaVersion and no fields beyond schemaVersion, metadata, elements, relationships, constraints and views. See get_schema for the exact shape.
    data: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct AddElementItem {
    /// Element kind: "landscape", "system", "container", "component" or "code"
    kind: ElementKind,
    /// Display name. Default: "New <kind>"
    name: Option<String>,
    /// ID of the element to nest under (the element currently drilled into). Omit for top-level systems; they are placed under the landscape automatically.
    focus: Option<String>,
    /// View that gets a node for the element. Default: the first view.
    view_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct AddElementsRequest {
    /// Name of the model
    name: String,
    /// Elements to add, in order
    elements: Vec<AddElementItem>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct DeleteElementsRequest {
    /// Name of the model
    name: String,
    /// IDs of the elements to delete. Descendants, their relationships and layout entries go too.
    element_ids: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct MoveElementRequest {
    /// Name of the model
    name: String,
    /// View whose layout to change
    view_id: String,
    /// Element to move
    element_id: String,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct AddRelationshipRequest {
    /// Name of the model
    name: String,
    /// View that gets the edge
    view_id: String,
    /// Source element ID
    source_id: String,
    /// Target element ID
    target_id: String,
    /// Relationship type, e.g. "uses". Default: "relates_to"
    relationship_type: Option<String>,
    /// Explicit ID. Default: next free "rel-N"
    id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct DeleteRelationshipsRequest {
    /// Name of the model
    name: String,
    /// IDs of relationships to delete. Unknown IDs are ignored.
    relationship_ids: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct ComputeLayoutRequest {
    /// Name of the model
    name: String,
    /// View to lay out
    view_id: String,
    /// Element drilled into. When set, only its children are laid out.
    focus: Option<String>,
    /// Layout options. Default: the options in settings.json
    options: Option<LayoutOptions>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct SemanticZoomRequest {
    /// Zoom factor, nominally 0.0 to 1.0
    zoom: f64,
}

// --- Server ---

#[derive(Clone)]
pub struct AtlasServer {
    tool_router: ToolRouter<Self>,
    library: ModelLibrary,
}

#[tool_router]
impl AtlasServer {
    pub fn new(library: ModelLibrary) -> Self {
        Self {
            tool_router: Self::tool_router(),
            library,
        }
    }

    fn read(&self, name: &str) -> Result<ArchitectureModel, CallToolResult> {
        self.library.read(name).map_err(|e| {
            CallToolResult::error(vec![Content::text(format!(
                "Failed to read model '{}': {}",
                name, e
            ))])
        })
    }

    /// Save and answer with the validation report for the saved model.
    fn commit(&self, name: &str, model: &ArchitectureModel, summary: String) -> CallToolResult {
        if let Err(e) = self.library.write(name, model) {
            return CallToolResult::error(vec![Content::text(format!(
                "Failed to write model '{}': {}",
                name, e
            ))]);
        }
        let diagnostics = validate(model);
        tracing::info!(model = name, findings = diagnostics.len(), "{}", summary);
        CallToolResult::success(vec![Content::text(format!(
            "{}\n\n{}",
            summary,
            report(&diagnostics)
        ))])
    }

    #[tool(description = "List all available architecture models")]
    fn list_models(&self) -> Result<CallToolResult, McpError> {
        match self.library.list() {
            Ok(names) => {
                let text = if names.is_empty() {
                    "No models found. Use set_model to create one.".to_string()
                } else {
                    names.join("\n")
                };
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }

    #[tool(
        description = "Get the full JSON content of a model: {schemaVersion, metadata, elements, relationships, constraints, views}. Elements form a landscape > system > container > component > code hierarchy through parentId."
    )]
    fn get_model(
        &self,
        Parameters(req): Parameters<ModelNameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let model = match self.read(&req.name) {
            Ok(m) => m,
            Err(result) => return Ok(result),
        };
        match export_model(&model) {
            Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Serialization error: {}",
                e
            ))])),
        }
    }

    #[tool(
        description = "Create or overwrite a model from JSON. The import is rejected when schemaVersion is missing or unknown, or when the object has unknown top-level fields. Accepted models are saved even when they have validation findings; the findings are returned."
    )]
    fn set_model(
        &self,
        Parameters(req): Parameters<SetModelRequest>,
    ) -> Result<CallToolResult, McpError> {
        let model = match import_model(&req.data) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(model = %req.name, error = %e, "rejected model import");
                return Ok(CallToolResult::error(vec![Content::text(e.to_string())]));
            }
        };
        Ok(self.commit(&req.name, &model, format!("Saved model '{}'", req.name)))
    }

    #[tool(description = "Delete a model from the library")]
    fn delete_model(
        &self,
        Parameters(req): Parameters<ModelNameRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.library.delete(&req.name) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Deleted model '{}'",
                req.name
            ))])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }

    #[tool(
        description = "Validate a model. Returns every finding as JSON {code, message, path, severity}, errors first in rule order (ids, references, hierarchy, views/layout), followed by deprecation warnings."
    )]
    fn validate_model(
        &self,
        Parameters(req): Parameters<ModelNameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let model = match self.read(&req.name) {
            Ok(m) => m,
            Err(result) => return Ok(result),
        };
        let mut findings = validate(&model);
        findings.extend(lint_deprecated(&model));
        Ok(CallToolResult::success(vec![Content::text(report(&findings))]))
    }

    #[tool(description = "Get the JSON Schema of the architecture model format")]
    fn get_schema(&self) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(&model_schema())
            .unwrap_or_else(|e| format!("Serialization error: {}", e));
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(
        description = "Add elements to a model. Each element gets a fresh ID and a node on the target view. Top-level systems are placed under the model's landscape, which is created when missing. Returns the new IDs and the validation report."
    )]
    fn add_elements(
        &self,
        Parameters(req): Parameters<AddElementsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut model = match self.read(&req.name) {
            Ok(m) => m,
            Err(result) => return Ok(result),
        };
        let mut added = Vec::with_capacity(req.elements.len());
        for item in req.elements {
            let request = AddElement {
                kind: item.kind,
                name: item.name,
                focus: item.focus,
                view_id: item.view_id,
            };
            match add_element(&model, request) {
                Ok((next, id)) => {
                    model = next;
                    added.push(id);
                }
                Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
            }
        }
        let summary = format!("Added elements: {}", added.join(", "));
        Ok(self.commit(&req.name, &model, summary))
    }

    #[tool(
        description = "Delete elements together with their descendants, every relationship touching them and their layout nodes and edges in all views"
    )]
    fn delete_elements(
        &self,
        Parameters(req): Parameters<DeleteElementsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let model = match self.read(&req.name) {
            Ok(m) => m,
            Err(result) => return Ok(result),
        };
        let next = delete_elements(&model, &req.element_ids);
        let summary = format!(
            "Deleted {} element(s) and {} relationship(s)",
            model.elements.len() - next.elements.len(),
            model.relationships.len() - next.relationships.len()
        );
        Ok(self.commit(&req.name, &next, summary))
    }

    #[tool(description = "Move an element's node on a view, adding a node if the view has none for it")]
    fn move_element(
        &self,
        Parameters(req): Parameters<MoveElementRequest>,
    ) -> Result<CallToolResult, McpError> {
        let model = match self.read(&req.name) {
            Ok(m) => m,
            Err(result) => return Ok(result),
        };
        match move_element(&model, &req.view_id, &req.element_id, req.x, req.y) {
            Ok(next) => {
                let summary = format!("Moved '{}' to ({}, {})", req.element_id, req.x, req.y);
                Ok(self.commit(&req.name, &next, summary))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }

    #[tool(
        description = "Add a relationship and its edge on a view. Endpoints are not checked up front; dangling endpoints show up in the returned validation report."
    )]
    fn add_relationship(
        &self,
        Parameters(req): Parameters<AddRelationshipRequest>,
    ) -> Result<CallToolResult, McpError> {
        let model = match self.read(&req.name) {
            Ok(m) => m,
            Err(result) => return Ok(result),
        };
        let request = AddRelationship {
            view_id: req.view_id,
            source_id: req.source_id,
            target_id: req.target_id,
            relationship_type: req.relationship_type,
            id: req.id,
        };
        match add_relationship_to_model(&model, request) {
            Ok((next, id)) => {
                Ok(self.commit(&req.name, &next, format!("Added relationship '{}'", id)))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }

    #[tool(description = "Delete relationships and their edges in every view")]
    fn delete_relationships(
        &self,
        Parameters(req): Parameters<DeleteRelationshipsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let model = match self.read(&req.name) {
            Ok(m) => m,
            Err(result) => return Ok(result),
        };
        let next = req
            .relationship_ids
            .iter()
            .fold(model.clone(), |m, id| remove_relationship_from_model(&m, id));
        let summary = format!(
            "Deleted {} relationship(s)",
            model.relationships.len() - next.relationships.len()
        );
        Ok(self.commit(&req.name, &next, summary))
    }

    #[tool(
        description = "Recompute a view's layout on a deterministic grid over the elements visible at the view's level (or the children of focus), replacing the view's nodes and edges"
    )]
    fn compute_layout(
        &self,
        Parameters(req): Parameters<ComputeLayoutRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut model = match self.read(&req.name) {
            Ok(m) => m,
            Err(result) => return Ok(result),
        };
        let Some(index) = model.views.iter().position(|v| v.id == req.view_id) else {
            return Ok(CallToolResult::error(vec![Content::text(format!(
                "View '{}' not found",
                req.view_id
            ))]));
        };
        let options = req
            .options
            .unwrap_or_else(|| read_settings(self.library.root()).layout);
        let view = &model.views[index];
        let scoped = scoped_model(&model, view.level, req.focus.as_deref());
        let layout = compute_layout(&scoped, view, &options);
        let summary = format!(
            "{}: laid out {} node(s) and {} edge(s)",
            diagram_title(view.level, req.focus.as_deref()),
            layout.nodes.len(),
            layout.edges.len()
        );
        model.views[index].layout = Some(layout);
        Ok(self.commit(&req.name, &model, summary))
    }

    #[tool(
        description = "Repair a model's hierarchy: systems without a parent are placed under the top-level landscape, created if missing. Returns what was changed and the findings that remain."
    )]
    fn repair_model(
        &self,
        Parameters(req): Parameters<ModelNameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let model = match self.read(&req.name) {
            Ok(m) => m,
            Err(result) => return Ok(result),
        };
        let repaired = repair_hierarchy(&model, &validate(&model));
        if repaired.reparented.is_empty() && repaired.created_landscape.is_none() {
            return Ok(CallToolResult::success(vec![Content::text(format!(
                "Nothing to repair.\n\n{}",
                report(&repaired.remaining)
            ))]));
        }
        let mut summary = format!("Re-parented systems: {}", repaired.reparented.join(", "));
        if let Some(id) = &repaired.created_landscape {
            summary.push_str(&format!("\nCreated landscape '{}'", id));
        }
        Ok(self.commit(&req.name, &repaired.model, summary))
    }

    #[tool(description = "Map a canvas zoom factor to the hierarchy level to render")]
    fn semantic_zoom(
        &self,
        Parameters(req): Parameters<SemanticZoomRequest>,
    ) -> Result<CallToolResult, McpError> {
        let level = semantic_zoom_level(req.zoom);
        let (min, max) = zoom_range(level);
        let body = serde_json::json!({ "level": level, "min": min, "max": max });
        Ok(CallToolResult::success(vec![Content::text(body.to_string())]))
    }
}

#[tool_handler]
impl ServerHandler for AtlasServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// --- Helpers ---

fn report(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "Model is valid.".to_string();
    }
    let json = serde_json::to_string_pretty(diagnostics)
        .unwrap_or_else(|e| format!("Serialization error: {}", e));
    format!("{} finding(s):\n{}", diagnostics.len(), json)
}

const INSTRUCTIONS: &str = r#"arch-atlas stores C4-style architecture models as JSON files (<name>.arch.json).

## Hierarchy
- **Landscape**: Top-level container for all systems. No parent.
- **System**: A software system. Parent must be a landscape.
- **Container**: An application or data store inside a system. Parent must be a system.
- **Component**: A logical component inside a container. Parent must be a container.
- **Code**: A file, module or symbol inside a component. Parent must be a component. Must carry a codeRef {kind: "file" | "module" | "symbol", ref}. No other kind may carry a codeRef.

## Views
Every view needs a layout {algorithm, nodes, edges}. Layout nodes and edges must point at existing elements and relationships.

## Workflow
Use get_model to read, the add_/delete_/move_ tools to edit, and validate_model to check. Every edit returns the validation report of the saved model. Use repair_model when systems have lost their landscape parent."#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .init();

    let library = ModelLibrary::open_default();
    tracing::info!(root = %library.root().display(), "serving model library");

    let service = AtlasServer::new(library)
        .serve(rmcp::transport::io::stdio())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "MCP server error"))?;
    service.waiting().await?;
    Ok(())
}
