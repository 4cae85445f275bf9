//! Batch transition orchestrator.
//!
//! Applies one action to many directives with per-item fault isolation:
//! a failing item is recorded as `"{namespace}/{name}: {reason}"` and the
//! batch moves on. Items are processed sequentially in input order; they
//! touch disjoint resource keys, so no cross-item invariant exists and
//! nothing is rolled back when a later item fails.

use crate::machine::TransitionAction;
use crate::transition::TransitionHandler;
use crds::ScheduledScaling;
use scaling_client::{DirectiveStore, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// One directive addressed by a batch request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchTarget {
    /// Name of the directive
    pub name: String,

    /// Namespace (defaults per-item when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Wire shape of a batch transition request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Directives to transition, processed in order
    #[serde(rename = "scheduledscalings")]
    pub scheduled_scalings: Vec<BatchTarget>,

    /// Action applied uniformly to all items
    pub action: TransitionAction,
}

/// Aggregate result of a batch transition.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Number of directives updated
    pub success: usize,

    /// Number of items that failed
    pub errors: usize,

    /// Updated resources in encounter order
    pub results: Vec<ScheduledScaling>,

    /// Per-item failure messages, keyed by "namespace/name"; omitted from
    /// the wire when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error_messages: Vec<String>,
}

/// Applies one transition across a list of directives.
pub struct BatchOrchestrator {
    handler: TransitionHandler,
}

impl BatchOrchestrator {
    /// Create an orchestrator over an injected store.
    pub fn new(store: Arc<dyn DirectiveStore>) -> Self {
        Self {
            handler: TransitionHandler::new(store),
        }
    }

    /// Process a parsed batch request.
    pub async fn run_request(&self, request: &BatchRequest) -> BatchOutcome {
        self.run(&request.scheduled_scalings, request.action).await
    }

    /// Apply `action` to every target, isolating per-item failures.
    pub async fn run(&self, targets: &[BatchTarget], action: TransitionAction) -> BatchOutcome {
        let mut results = Vec::new();
        let mut error_messages = Vec::new();

        for target in targets {
            let namespace = target
                .namespace
                .as_deref()
                .filter(|ns| !ns.is_empty())
                .unwrap_or(DEFAULT_NAMESPACE);

            match self
                .handler
                .apply_batch_item(namespace, &target.name, action)
                .await
            {
                Ok(updated) => results.push(updated),
                Err(err) => {
                    warn!(
                        "Batch {} failed for {}/{}: {}",
                        action, namespace, target.name, err
                    );
                    error_messages.push(format!("{}/{}: {}", namespace, target.name, err));
                }
            }
        }

        BatchOutcome {
            success: results.len(),
            errors: error_messages.len(),
            results,
            error_messages,
        }
    }
}
