//! Gestures reported by the canvas, applied as pure model updates.

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::elements::{delete_elements, move_element};
use crate::error::MutationError;
use crate::model::ArchitectureModel;
use crate::relationships::{add_relationship_to_model, remove_relationship_from_model, AddRelationship};
use crate::validate::validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum CanvasEvent {
    #[serde(rename_all = "camelCase")]
    ElementMoved {
        view_id: String,
        element_id: String,
        x: f64,
        y: f64,
    },
    #[serde(rename_all = "camelCase")]
    RelationshipRequested {
        view_id: String,
        source_id: String,
        target_id: String,
    },
    #[serde(rename_all = "camelCase")]
    RelationshipDeleted { relationship_id: String },
    #[serde(rename_all = "camelCase")]
    ElementsDeleted { element_ids: Vec<String> },
}

/// The model after an event, with a fresh validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub model: ArchitectureModel,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn apply_event(model: &ArchitectureModel, event: CanvasEvent) -> Result<Applied, MutationError> {
    let next = match event {
        CanvasEvent::ElementMoved {
            view_id,
            element_id,
            x,
            y,
        } => move_element(model, &view_id, &element_id, x, y)?,
        // A connection dropped back on its start element is a cancelled gesture.
        CanvasEvent::RelationshipRequested {
            source_id,
            target_id,
            ..
        } if source_id == target_id => model.clone(),
        CanvasEvent::RelationshipRequested {
            view_id,
            source_id,
            target_id,
        } => add_relationship_to_model(
            model,
            AddRelationship {
                view_id,
                source_id,
                target_id,
                relationship_type: None,
                id: None,
            },
        )?
        .0,
        CanvasEvent::RelationshipDeleted { relationship_id } => {
            remove_relationship_from_model(model, &relationship_id)
        }
        CanvasEvent::ElementsDeleted { element_ids } => delete_elements(model, &element_ids),
    };
    let diagnostics = validate(&next);
    Ok(Applied {
        model: next,
        diagnostics,
    })
}
