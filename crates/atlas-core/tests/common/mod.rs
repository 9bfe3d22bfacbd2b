#![allow(dead_code)]

use atlas_core::*;

/// A small model that passes every rule: one landscape with two systems, one system
/// detailed down to code, one relationship and a complete view.
pub fn minimal_model() -> ArchitectureModel {
    let json = serde_json::json!({
        "schemaVersion": "0.1.0",
        "metadata": { "title": "Minimal", "description": "fixture" },
        "elements": [
            { "id": "landscape-1", "kind": "landscape", "name": "Landscape" },
            { "id": "system-1", "kind": "system", "name": "Orders", "parentId": "landscape-1" },
            { "id": "container-1", "kind": "container", "name": "API", "parentId": "system-1", "technology": "Axum" },
            { "id": "component-1", "kind": "component", "name": "Checkout", "parentId": "container-1", "componentType": "Service" },
            { "id": "code-1", "kind": "code", "name": "checkout.rs", "parentId": "component-1",
              "codeRef": { "kind": "file", "ref": "src/checkout.rs" } },
            { "id": "system-2", "kind": "system", "name": "Billing", "parentId": "landscape-1" }
        ],
        "relationships": [
            { "id": "rel-1", "sourceId": "system-1", "targetId": "system-2", "type": "uses",
              "action": "Requests invoices", "integrationMode": "REST API" }
        ],
        "constraints": [
            { "id": "c-1", "type": "no-cycles", "scope": { "level": "system" }, "severity": "warning" }
        ],
        "views": [
            { "id": "view-1", "level": "system", "title": "System Context",
              "layout": {
                "algorithm": "deterministic-v1",
                "nodes": [
                    { "elementId": "system-1", "x": 50, "y": 50, "w": 120, "h": 80 },
                    { "elementId": "system-2", "x": 200, "y": 50, "w": 120, "h": 80 }
                ],
                "edges": [ { "relationshipId": "rel-1" } ]
              } }
        ]
    });
    serde_json::from_value(json).expect("fixture parses")
}

/// Two unparented systems on one view with two nodes and no edges.
pub fn two_systems() -> ArchitectureModel {
    let mut model = ArchitectureModel::skeleton("Test Model");
    model.elements = vec![
        Element::new("sys-1", ElementKind::System, "System A"),
        Element::new("sys-2", ElementKind::System, "System B"),
    ];
    let layout = model.views[0].layout.as_mut().unwrap();
    for (i, id) in ["sys-1", "sys-2"].into_iter().enumerate() {
        layout.nodes.push(LayoutNode {
            element_id: id.to_string(),
            x: 200.0 * i as f64,
            y: 0.0,
            width: Some(120.0),
            height: Some(80.0),
            collapsed: None,
        });
    }
    model
}
