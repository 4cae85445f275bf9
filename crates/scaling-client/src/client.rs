//! Kubernetes-backed ScheduledScaling store client
//!
//! Thin typed CRUD + status-patch proxy over the cluster API. Holds no
//! cached state; every call builds a namespaced `Api` handle from the
//! injected `kube::Client`.

use crate::error::StoreError;
use crate::store_trait::DirectiveStore;
use crate::DEFAULT_NAMESPACE;
use crds::ScheduledScaling;
use kube::api::{Api, DeleteParams, ListParams, Patch, PatchParams, PostParams};
use kube::Client;
use tracing::debug;

/// Kubernetes store client for ScheduledScaling resources
pub struct DirectiveClient {
    client: Client,
}

impl DirectiveClient {
    /// Create a new store client from an injected Kubernetes client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<ScheduledScaling> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Normalize a directive before creation: default the namespace and
/// synthesize a name when the caller supplied none.
///
/// The synthesized name carries a unix-seconds suffix, unique in practice
/// within a namespace; a collision surfaces as `Conflict` from the store.
pub fn prepare_for_create(mut directive: ScheduledScaling) -> ScheduledScaling {
    if directive
        .metadata
        .namespace
        .as_deref()
        .is_none_or(str::is_empty)
    {
        directive.metadata.namespace = Some(DEFAULT_NAMESPACE.to_string());
    }
    if directive.metadata.name.as_deref().is_none_or(str::is_empty) {
        directive.metadata.name = Some(format!(
            "scheduledscaling-{}",
            chrono::Utc::now().timestamp()
        ));
    }
    directive
}

#[async_trait::async_trait]
impl DirectiveStore for DirectiveClient {
    async fn list(&self, namespace: &str) -> Result<Vec<ScheduledScaling>, StoreError> {
        debug!("Listing scheduledscalings in {}", namespace);
        let list = self.api(namespace).list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<ScheduledScaling, StoreError> {
        debug!("Fetching scheduledscaling {}/{}", namespace, name);
        Ok(self.api(namespace).get(name).await?)
    }

    async fn create(&self, directive: ScheduledScaling) -> Result<ScheduledScaling, StoreError> {
        let directive = prepare_for_create(directive);
        let namespace = directive
            .metadata
            .namespace
            .clone()
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        debug!(
            "Creating scheduledscaling {}/{}",
            namespace,
            directive.metadata.name.as_deref().unwrap_or("")
        );
        Ok(self
            .api(&namespace)
            .create(&PostParams::default(), &directive)
            .await?)
    }

    async fn update(&self, directive: ScheduledScaling) -> Result<ScheduledScaling, StoreError> {
        let name = directive
            .metadata
            .name
            .clone()
            .ok_or_else(|| StoreError::InvalidRequest("update requires a name".to_string()))?;
        let namespace = directive
            .metadata
            .namespace
            .clone()
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        debug!("Updating scheduledscaling {}/{}", namespace, name);
        Ok(self
            .api(&namespace)
            .replace(&name, &PostParams::default(), &directive)
            .await?)
    }

    async fn patch_status(
        &self,
        namespace: &str,
        name: &str,
        status_patch: &serde_json::Value,
    ) -> Result<ScheduledScaling, StoreError> {
        debug!("Patching scheduledscaling {}/{} status", namespace, name);
        let pp = PatchParams::default();
        Ok(self
            .api(namespace)
            .patch_status(name, &pp, &Patch::Merge(status_patch))
            .await?)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        debug!("Deleting scheduledscaling {}/{}", namespace, name);
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }
}
