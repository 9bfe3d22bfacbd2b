//! Deterministic grid layout and semantic zoom.

mod zoom;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{ArchitectureModel, LayoutEdge, LayoutNode, LayoutState, View};

pub use zoom::{semantic_zoom_level, zoom_range, ZOOM_THRESHOLDS};

pub const DEFAULT_SPACING: f64 = 150.0;
pub const DEFAULT_PADDING: f64 = 50.0;
pub const NODE_WIDTH: f64 = 120.0;
pub const NODE_HEIGHT: f64 = 80.0;
const GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
pub struct LayoutOptions {
    /// Echoed into the result as-is.
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
}

impl LayoutOptions {
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            spacing: None,
            padding: None,
        }
    }
}

/// Lay out every element of `model` on a three-column grid, in array order.
///
/// The caller pre-filters `model.elements` to what the view should show. Edges are
/// derived: a relationship gets one edge when both endpoints are among the laid-out
/// elements, and is left out of the layout otherwise.
pub fn compute_layout(model: &ArchitectureModel, _view: &View, options: &LayoutOptions) -> LayoutState {
    let spacing = options.spacing.unwrap_or(DEFAULT_SPACING);
    let padding = options.padding.unwrap_or(DEFAULT_PADDING);

    let nodes: Vec<LayoutNode> = model
        .elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let col = (index % GRID_COLUMNS) as f64;
            let row = (index / GRID_COLUMNS) as f64;
            LayoutNode {
                element_id: element.id.clone(),
                x: padding + col * spacing,
                y: padding + row * spacing,
                width: Some(NODE_WIDTH),
                height: Some(NODE_HEIGHT),
                collapsed: None,
            }
        })
        .collect();

    let present: HashSet<&str> = model.elements.iter().map(|e| e.id.as_str()).collect();
    let edges: Vec<LayoutEdge> = model
        .relationships
        .iter()
        .filter(|rel| {
            present.contains(rel.source_id.as_str()) && present.contains(rel.target_id.as_str())
        })
        .map(|rel| LayoutEdge::new(rel.id.clone()))
        .collect();

    tracing::debug!(
        algorithm = %options.algorithm,
        nodes = nodes.len(),
        edges = edges.len(),
        "computed layout"
    );

    LayoutState {
        algorithm: options.algorithm.clone(),
        nodes,
        edges,
        viewport: None,
    }
}

pub fn serialize_layout(layout: &LayoutState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(layout)
}

pub fn deserialize_layout(json: &str) -> Result<LayoutState, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, ElementKind, Relationship, DEFAULT_ALGORITHM};
    use crate::rules::fixture::valid_model;

    fn systems(n: usize) -> ArchitectureModel {
        let mut model = ArchitectureModel::skeleton("Grid");
        model.elements = (0..n)
            .map(|i| Element::new(format!("s{i}"), ElementKind::System, format!("S{i}")))
            .collect();
        model
    }

    #[test]
    fn grid_wraps_after_three_columns() {
        let model = systems(5);
        let layout = compute_layout(&model, &model.views[0], &LayoutOptions::new("grid"));
        let points: Vec<(f64, f64)> = layout.nodes.iter().map(|n| (n.x, n.y)).collect();
        assert_eq!(
            points,
            [(50.0, 50.0), (200.0, 50.0), (350.0, 50.0), (50.0, 200.0), (200.0, 200.0)]
        );
        assert!(layout
            .nodes
            .iter()
            .all(|n| n.width == Some(120.0) && n.height == Some(80.0)));
        assert_eq!(layout.algorithm, "grid");
    }

    #[test]
    fn spacing_and_padding_override_defaults() {
        let model = systems(4);
        let options = LayoutOptions {
            algorithm: DEFAULT_ALGORITHM.into(),
            spacing: Some(100.0),
            padding: Some(10.0),
        };
        let layout = compute_layout(&model, &model.views[0], &options);
        assert_eq!((layout.nodes[2].x, layout.nodes[2].y), (210.0, 10.0));
        assert_eq!((layout.nodes[3].x, layout.nodes[3].y), (10.0, 110.0));
    }

    #[test]
    fn edges_need_both_endpoints_present() {
        let mut model = systems(2);
        model.relationships = vec![
            Relationship::new("inside", "s0", "s1", "uses"),
            Relationship::new("outside", "s0", "elsewhere", "uses"),
            Relationship::new("self", "s1", "s1", "uses"),
        ];
        let layout = compute_layout(&model, &model.views[0], &LayoutOptions::new("grid"));
        let ids: Vec<&str> = layout.edges.iter().map(|e| e.relationship_id.as_str()).collect();
        assert_eq!(ids, ["inside", "self"]);
        assert_eq!(model.relationships.len(), 3);
    }

    #[test]
    fn layout_serializes_and_parses_back() {
        let model = valid_model();
        let layout = compute_layout(&model, &model.views[0], &LayoutOptions::new("grid"));
        let json = serialize_layout(&layout).unwrap();
        assert_eq!(deserialize_layout(&json).unwrap(), layout);
    }
}
