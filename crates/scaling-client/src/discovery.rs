//! Read-only discovery of autoscale targets and namespaces
//!
//! Passthrough listings used to populate target pickers in a UI. No core
//! logic lives here; the reconciler owns everything about the targets
//! themselves.

use crate::error::StoreError;
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Api, ListParams};
use kube::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A workload that can be targeted by a ScheduledScaling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutoscaleTarget {
    /// Name of the autoscaler
    pub name: String,

    /// Namespace the autoscaler lives in
    pub namespace: String,
}

/// Trait for target/namespace discovery operations
#[async_trait::async_trait]
pub trait TargetDiscovery: Send + Sync {
    /// List autoscalers in one namespace, or cluster-wide when `None`.
    async fn list_autoscale_targets(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<AutoscaleTarget>, StoreError>;

    /// List namespace names.
    async fn list_namespaces(&self) -> Result<Vec<String>, StoreError>;
}

/// Kubernetes-backed discovery client
pub struct DiscoveryClient {
    client: Client,
}

impl DiscoveryClient {
    /// Create a new discovery client from an injected Kubernetes client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl TargetDiscovery for DiscoveryClient {
    async fn list_autoscale_targets(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<AutoscaleTarget>, StoreError> {
        let api: Api<HorizontalPodAutoscaler> = match namespace {
            Some(ns) => {
                debug!("Listing autoscalers in {}", ns);
                Api::namespaced(self.client.clone(), ns)
            }
            None => {
                debug!("Listing autoscalers cluster-wide");
                Api::all(self.client.clone())
            }
        };
        let list = api.list(&ListParams::default()).await?;
        Ok(list
            .items
            .into_iter()
            .filter_map(|hpa| {
                Some(AutoscaleTarget {
                    name: hpa.metadata.name?,
                    namespace: hpa.metadata.namespace?,
                })
            })
            .collect())
    }

    async fn list_namespaces(&self) -> Result<Vec<String>, StoreError> {
        debug!("Listing namespaces");
        let api: Api<Namespace> = Api::all(self.client.clone());
        let list = api.list(&ListParams::default()).await?;
        Ok(list
            .items
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoscale_target_serializes_camel_case() {
        let target = AutoscaleTarget {
            name: "web".to_string(),
            namespace: "ns1".to_string(),
        };
        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "web", "namespace": "ns1"})
        );
    }
}
