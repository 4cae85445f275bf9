//! ScheduledScaling Lifecycle Core
//!
//! The resource lifecycle and transition protocol for ScheduledScaling
//! directives: which manual transitions are legal in which phase, how a
//! transition is written back as a status merge patch that preserves the
//! reconciler's fields, and how batches of transitions execute with
//! per-item fault isolation.
//!
//! The scheduling itself (cron parsing, next-fire computation, mutating
//! the target workload) belongs to the external reconciler; this crate
//! only exposes the phase the reconciler last wrote and accepts manual
//! overrides.
//!
//! # Example
//!
//! ```no_run
//! use scaling_lifecycle::{TransitionAction, TransitionHandler};
//! use scaling_client::DirectiveClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let kube_client = kube::Client::try_default().await?;
//! let handler = TransitionHandler::new(Arc::new(DirectiveClient::new(kube_client)));
//!
//! // Cancel one directive; reconciler-owned status fields survive
//! let updated = handler.apply("default", "nightly-scale-up", TransitionAction::Cancel).await?;
//! println!("{:?}", updated.status);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod error;
pub mod machine;
pub mod merge;
pub mod transition;
#[cfg(test)]
pub(crate) mod test_utils;

pub use batch::{BatchOrchestrator, BatchOutcome, BatchRequest, BatchTarget};
pub use error::TransitionError;
pub use machine::{validate_transition, TransitionAction};
pub use merge::build_status_patch;
pub use transition::TransitionHandler;
