//! Mock DirectiveStore for unit testing
//!
//! In-memory implementation of `DirectiveStore` that can be used in unit
//! tests without a running cluster. Mirrors the store semantics the
//! transition protocol depends on: keyed identity, conflict on collision,
//! and RFC 7386-style merge on the status sub-document.

use crate::client::prepare_for_create;
use crate::error::StoreError;
use crate::store_trait::DirectiveStore;
use crate::DEFAULT_NAMESPACE;
use crds::ScheduledScaling;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Key = (String, String);

/// Mock store for testing
///
/// Stores resources in memory, counts writes so tests can assert that a
/// failed validation performed none, and can be armed to fail the next
/// operation to simulate store errors.
#[derive(Clone, Default)]
pub struct MockDirectiveStore {
    directives: Arc<Mutex<HashMap<Key, ScheduledScaling>>>,
    writes: Arc<Mutex<usize>>,
    fail_next: Arc<Mutex<Option<StoreError>>>,
}

impl MockDirectiveStore {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a directive directly (for test setup)
    pub fn add_directive(&self, directive: ScheduledScaling) {
        let key = Self::key_of(&directive);
        self.directives.lock().unwrap().insert(key, directive);
    }

    /// Read a stored directive without going through the trait
    pub fn get_stored(&self, namespace: &str, name: &str) -> Option<ScheduledScaling> {
        self.directives
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Number of writes (create/update/patch/delete) performed so far
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    /// Arm the mock to fail its next operation with `err`
    pub fn fail_next(&self, err: StoreError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    fn key_of(directive: &ScheduledScaling) -> Key {
        (
            directive
                .metadata
                .namespace
                .clone()
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            directive.metadata.name.clone().unwrap_or_default(),
        )
    }

    fn take_injected_failure(&self) -> Option<StoreError> {
        self.fail_next.lock().unwrap().take()
    }

    fn record_write(&self) {
        *self.writes.lock().unwrap() += 1;
    }

    fn not_found(namespace: &str, name: &str) -> StoreError {
        StoreError::NotFound(format!(
            "scheduledscalings \"{name}\" not found in {namespace}"
        ))
    }
}

#[async_trait::async_trait]
impl DirectiveStore for MockDirectiveStore {
    async fn list(&self, namespace: &str) -> Result<Vec<ScheduledScaling>, StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let mut items: Vec<ScheduledScaling> = self
            .directives
            .lock()
            .unwrap()
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, directive)| directive.clone())
            .collect();
        items.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
        Ok(items)
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<ScheduledScaling, StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        self.get_stored(namespace, name)
            .ok_or_else(|| Self::not_found(namespace, name))
    }

    async fn create(&self, directive: ScheduledScaling) -> Result<ScheduledScaling, StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let directive = prepare_for_create(directive);
        let key = Self::key_of(&directive);
        let mut map = self.directives.lock().unwrap();
        if map.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "scheduledscalings \"{}\" already exists",
                key.1
            )));
        }
        map.insert(key, directive.clone());
        drop(map);
        self.record_write();
        Ok(directive)
    }

    async fn update(&self, directive: ScheduledScaling) -> Result<ScheduledScaling, StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        if directive.metadata.name.is_none() {
            return Err(StoreError::InvalidRequest(
                "update requires a name".to_string(),
            ));
        }
        let key = Self::key_of(&directive);
        let mut map = self.directives.lock().unwrap();
        if !map.contains_key(&key) {
            return Err(Self::not_found(&key.0, &key.1));
        }
        map.insert(key, directive.clone());
        drop(map);
        self.record_write();
        Ok(directive)
    }

    async fn patch_status(
        &self,
        namespace: &str,
        name: &str,
        status_patch: &serde_json::Value,
    ) -> Result<ScheduledScaling, StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let key = (namespace.to_string(), name.to_string());
        let mut map = self.directives.lock().unwrap();
        let stored = map
            .get(&key)
            .ok_or_else(|| Self::not_found(namespace, name))?;

        // Merge-patch semantics scoped to the status sub-document: patch
        // keys replace, nulls delete, everything else is untouched.
        let mut doc = serde_json::to_value(stored)?;
        if let Some(patch_obj) = status_patch.get("status").and_then(|s| s.as_object()) {
            let root = doc
                .as_object_mut()
                .ok_or_else(|| StoreError::InvalidRequest("stored resource is not an object".to_string()))?;
            let status = root
                .entry("status")
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            let status_obj = status.as_object_mut().ok_or_else(|| {
                StoreError::InvalidRequest("stored status is not an object".to_string())
            })?;
            for (k, v) in patch_obj {
                if v.is_null() {
                    status_obj.remove(k);
                } else {
                    status_obj.insert(k.clone(), v.clone());
                }
            }
        }
        let updated: ScheduledScaling = serde_json::from_value(doc)?;
        map.insert(key, updated.clone());
        drop(map);
        self.record_write();
        Ok(updated)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let key = (namespace.to_string(), name.to_string());
        if self.directives.lock().unwrap().remove(&key).is_none() {
            return Err(Self::not_found(namespace, name));
        }
        self.record_write();
        Ok(())
    }
}
