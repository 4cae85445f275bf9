//! Single-item transition handler.
//!
//! Fetch, validate, patch: exactly one store read per request and exactly
//! one store write when validation passes. A validation failure performs
//! no write at all.

use crate::error::TransitionError;
use crate::machine::{validate_transition, TransitionAction};
use crate::merge::build_status_patch;
use crds::ScheduledScaling;
use scaling_client::DirectiveStore;
use std::sync::Arc;
use tracing::info;

/// Applies manual transitions to one directive at a time.
pub struct TransitionHandler {
    store: Arc<dyn DirectiveStore>,
}

impl TransitionHandler {
    /// Create a handler over an injected store.
    pub fn new(store: Arc<dyn DirectiveStore>) -> Self {
        Self { store }
    }

    /// Apply `action` to the directive `namespace/name` and return the
    /// updated resource.
    pub async fn apply(
        &self,
        namespace: &str,
        name: &str,
        action: TransitionAction,
    ) -> Result<ScheduledScaling, TransitionError> {
        self.apply_mode(namespace, name, action, false).await
    }

    /// Batch-mode variant; identical semantics, batch-suffixed message.
    pub(crate) async fn apply_batch_item(
        &self,
        namespace: &str,
        name: &str,
        action: TransitionAction,
    ) -> Result<ScheduledScaling, TransitionError> {
        self.apply_mode(namespace, name, action, true).await
    }

    async fn apply_mode(
        &self,
        namespace: &str,
        name: &str,
        action: TransitionAction,
        batch: bool,
    ) -> Result<ScheduledScaling, TransitionError> {
        let current = self.store.get(namespace, name).await?;

        let phase = current.status.as_ref().and_then(|s| s.phase.as_ref());
        validate_transition(action, phase)?;

        let patch = build_status_patch(
            current.status.as_ref(),
            &action.target_phase(),
            action.message(batch),
        )?;
        let updated = self.store.patch_status(namespace, name, &patch).await?;

        info!(
            "Applied {} to scheduledscaling {}/{} (was {})",
            action,
            namespace,
            name,
            phase.map_or("unset", |p| p.as_str())
        );
        Ok(updated)
    }
}
