//! Host boundary: the persistence collaborator that owns element records.
//!
//! The engine never writes records itself. It emits [`Action`]s; this module
//! forwards the persistence ones to a [`BoardHost`]. Creation is the one
//! truly async step: the host assigns the id, and only then does the element
//! exist locally.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use serde_json::Value;

use crate::element::{Element, ElementId, ElementKind, ElementPatch};
use crate::engine::{Action, CreateRequest, EngineCore};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by host operations.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The host does not know the element.
    #[error("element not found: {0}")]
    NotFound(ElementId),

    /// The host refused the request (validation, permissions).
    #[error("host rejected request: {0}")]
    Rejected(String),

    /// The request never reached the host or its reply was lost.
    #[error("host transport failed: {0}")]
    Transport(String),
}

// =============================================================================
// TRAIT
// =============================================================================

/// Async persistence boundary. Enables mocking in tests.
#[async_trait::async_trait]
pub trait BoardHost: Send + Sync {
    /// Create an element and return the id the host assigned.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the host rejects the element or cannot be reached.
    async fn add_element(&self, kind: ElementKind, props: &Value) -> Result<ElementId, HostError>;

    /// Shallow-merge `patch` into the stored record.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the element is unknown or the write fails.
    async fn update_element(&self, id: ElementId, patch: &ElementPatch) -> Result<(), HostError>;

    /// Remove an element.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the element is unknown or the write fails.
    async fn delete_element(&self, id: ElementId) -> Result<(), HostError>;
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Forward the persistence actions in `actions` to the host, in order.
/// UI-only actions are skipped. Returns how many calls were made.
///
/// # Errors
///
/// Stops at the first failing call and returns its error.
pub async fn dispatch(host: &dyn BoardHost, actions: &[Action]) -> Result<usize, HostError> {
    let mut sent = 0;
    for action in actions {
        match action {
            Action::UpdateElement { id, patch } => host.update_element(*id, patch).await?,
            Action::DeleteElement { id } => host.delete_element(*id).await?,
            _ => continue,
        }
        sent += 1;
    }
    Ok(sent)
}

/// Create an element from an external drop: wait for the host id, insert the
/// element locally, then persist any containment patches the insertion produced.
///
/// # Errors
///
/// Returns the host's error if creation or a follow-up update fails. A failed
/// creation leaves the engine untouched.
pub async fn create_element(
    engine: &mut EngineCore,
    host: &dyn BoardHost,
    request: CreateRequest,
) -> Result<ElementId, HostError> {
    let id = host.add_element(request.kind, &request.props).await?;
    tracing::debug!(%id, kind = ?request.kind, "host created element");

    let mut element = Element::new(id, request.kind, request.position);
    element.size = request.size;
    if let Some(content) = request.props.get("content").filter(|c| c.is_object()) {
        element.content = content.clone();
    }

    let actions = engine.adopt_created(element);
    dispatch(host, &actions).await?;
    Ok(id)
}
