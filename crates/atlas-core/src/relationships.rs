use crate::error::MutationError;
use crate::model::{ArchitectureModel, LayoutEdge, Relationship};

pub const DEFAULT_RELATIONSHIP_TYPE: &str = "relates_to";

/// A relationship drawn on one view.
#[derive(Debug, Clone, PartialEq)]
pub struct AddRelationship {
    pub view_id: String,
    pub source_id: String,
    pub target_id: String,
    /// Defaults to `relates_to`.
    pub relationship_type: Option<String>,
    /// Defaults to the next free `rel-N`.
    pub id: Option<String>,
}

/// Append a relationship and its layout edge on the named view. Returns the new model
/// and the relationship's id.
///
/// Endpoints are not checked; run `validate` afterwards. Fails when the view does not
/// exist or has no layout, so a relationship is never added without an edge.
pub fn add_relationship_to_model(
    model: &ArchitectureModel,
    request: AddRelationship,
) -> Result<(ArchitectureModel, String), MutationError> {
    let mut next = model.clone();
    let id = request
        .id
        .unwrap_or_else(|| crate::next_id(model, "rel"));

    crate::view_layout_mut(&mut next, &request.view_id)?
        .edges
        .push(LayoutEdge::new(id.clone()));

    next.relationships.push(Relationship::new(
        id.clone(),
        request.source_id,
        request.target_id,
        request
            .relationship_type
            .unwrap_or_else(|| DEFAULT_RELATIONSHIP_TYPE.to_string()),
    ));
    Ok((next, id))
}

/// Drop a relationship and every layout edge pointing at it, in every view.
/// Unknown ids leave the model as it was.
pub fn remove_relationship_from_model(
    model: &ArchitectureModel,
    relationship_id: &str,
) -> ArchitectureModel {
    let mut next = model.clone();
    next.relationships.retain(|r| r.id != relationship_id);
    for layout in next.views.iter_mut().filter_map(|v| v.layout.as_mut()) {
        layout.edges.retain(|e| e.relationship_id != relationship_id);
    }
    next
}

/// Replace a relationship by id, keeping its position in the sequence.
pub fn update_relationship(
    model: &ArchitectureModel,
    relationship: Relationship,
) -> Result<ArchitectureModel, MutationError> {
    let mut next = model.clone();
    let slot = next
        .relationships
        .iter_mut()
        .find(|r| r.id == relationship.id)
        .ok_or_else(|| MutationError::RelationshipNotFound(relationship.id.clone()))?;
    *slot = relationship;
    Ok(next)
}
