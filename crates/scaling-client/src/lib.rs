//! ScheduledScaling Store and Discovery Clients
//!
//! Typed Kubernetes access for the scaling control plane: CRUD + status
//! merge-patch on ScheduledScaling resources, and read-only discovery of
//! autoscale targets and namespaces for UI population.
//!
//! # Example
//!
//! ```no_run
//! use scaling_client::{DirectiveClient, DirectiveStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a store client from an injected Kubernetes client
//! let kube_client = kube::Client::try_default().await?;
//! let store = DirectiveClient::new(kube_client);
//!
//! // List directives in a namespace
//! let directives = store.list("default").await?;
//!
//! // Patch one directive's status sub-document
//! let patch = serde_json::json!({"status": {"phase": "Cancelled", "message": "Cancelled manually"}});
//! let updated = store.patch_status("default", "nightly-scale-up", &patch).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Store operations**: list/get/create/update/delete plus merge patches
//!   scoped to the status sub-resource
//! - **Name synthesis**: create without a name gets a time-derived one
//! - **Discovery**: autoscaler and namespace listings for target pickers
//! - **Mocking**: `test-util` feature provides an in-memory store

pub mod client;
pub mod discovery;
pub mod error;
#[path = "trait.rs"]
pub mod store_trait;
#[cfg(feature = "test-util")]
pub mod mock;

/// Namespace used when a caller supplies none.
pub const DEFAULT_NAMESPACE: &str = "default";

pub use client::{prepare_for_create, DirectiveClient};
pub use discovery::{AutoscaleTarget, DiscoveryClient, TargetDiscovery};
pub use error::StoreError;
pub use store_trait::DirectiveStore;
#[cfg(feature = "test-util")]
pub use mock::MockDirectiveStore;
