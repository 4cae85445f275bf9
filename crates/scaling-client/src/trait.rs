//! DirectiveStore trait for mocking
//!
//! This trait abstracts the resource store so the transition handler and
//! batch orchestrator can be unit-tested against an in-memory store. The
//! concrete `DirectiveClient` implements it against the Kubernetes API.

use crate::error::StoreError;
use crds::ScheduledScaling;

/// Trait for ScheduledScaling store operations
///
/// All operations are proxies to the external store keyed by
/// (namespace, name); implementations hold no cached resource state.
/// All async methods must be `Send` to work with Tokio's work-stealing
/// runtime.
#[async_trait::async_trait]
pub trait DirectiveStore: Send + Sync {
    /// List all directives in a namespace.
    async fn list(&self, namespace: &str) -> Result<Vec<ScheduledScaling>, StoreError>;

    /// Fetch one directive by name.
    async fn get(&self, namespace: &str, name: &str) -> Result<ScheduledScaling, StoreError>;

    /// Create a directive. A missing namespace defaults to `"default"` and
    /// a missing name is synthesized; an identity collision is a
    /// `Conflict`, never an overwrite.
    async fn create(&self, directive: ScheduledScaling) -> Result<ScheduledScaling, StoreError>;

    /// Replace a directive's spec. Requires a name; concurrent-update races
    /// surface as `Conflict`.
    async fn update(&self, directive: ScheduledScaling) -> Result<ScheduledScaling, StoreError>;

    /// Apply a merge patch to the status sub-resource only. Keys absent
    /// from the patch are left untouched in the store.
    async fn patch_status(
        &self,
        namespace: &str,
        name: &str,
        status_patch: &serde_json::Value,
    ) -> Result<ScheduledScaling, StoreError>;

    /// Delete a directive. Unconditional; there is no phase guard.
    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError>;
}
