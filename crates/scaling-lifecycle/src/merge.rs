//! Status merge protocol.
//!
//! A manual transition owns exactly two status keys: `phase` and
//! `message`. Everything else in the current status (reconciler-owned
//! timestamps, bound snapshots, keys this crate does not even model) is
//! copied through so the merge patch never drops another writer's data.

use crate::error::TransitionError;
use crds::{ScalingPhase, ScheduledScalingStatus};
use scaling_client::StoreError;
use serde_json::{Map, Value};

/// Build the `{"status": {...}}` merge-patch document for a transition.
///
/// The patch sets `phase` and `message`, then carries over every key of
/// the serialized current status it is not already setting. On a key
/// collision the patch's new value wins; shallow key presence only, no
/// deep merge.
pub fn build_status_patch(
    current: Option<&ScheduledScalingStatus>,
    phase: &ScalingPhase,
    message: &str,
) -> Result<Value, TransitionError> {
    let mut status = Map::new();
    status.insert("phase".to_string(), Value::String(phase.as_str().to_string()));
    status.insert("message".to_string(), Value::String(message.to_string()));

    if let Some(current) = current {
        let current_doc = serde_json::to_value(current).map_err(StoreError::from)?;
        if let Some(current_obj) = current_doc.as_object() {
            for (key, value) in current_obj {
                status
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
    }

    let mut patch = Map::new();
    patch.insert("status".to_string(), Value::Object(status));
    Ok(Value::Object(patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_from(value: Value) -> ScheduledScalingStatus {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn patch_without_current_status_sets_only_owned_keys() {
        let patch = build_status_patch(None, &ScalingPhase::Cancelled, "Cancelled manually").unwrap();
        assert_eq!(
            patch,
            serde_json::json!({
                "status": {"phase": "Cancelled", "message": "Cancelled manually"}
            })
        );
    }

    #[test]
    fn patch_overrides_phase_and_message_but_keeps_the_rest() {
        let current = status_from(serde_json::json!({
            "phase": "Active",
            "message": "Scaling applied",
            "appliedAt": "2026-01-05T09:00:00Z",
            "originalMinReplicas": 1,
            "originalMaxReplicas": 5
        }));

        let patch =
            build_status_patch(Some(&current), &ScalingPhase::Cancelled, "Reverting manually")
                .unwrap();
        let status = &patch["status"];

        assert_eq!(status["phase"], "Cancelled");
        assert_eq!(status["message"], "Reverting manually");
        assert_eq!(status["appliedAt"], "2026-01-05T09:00:00Z");
        assert_eq!(status["originalMinReplicas"], 1);
        assert_eq!(status["originalMaxReplicas"], 5);
    }

    #[test]
    fn patch_carries_unmodeled_status_keys() {
        let current = status_from(serde_json::json!({
            "phase": "Active",
            "lastFiredAt": "2026-01-05T09:00:00Z",
            "observedGeneration": 7
        }));

        let patch =
            build_status_patch(Some(&current), &ScalingPhase::Cancelled, "Cancelled manually")
                .unwrap();
        let status = &patch["status"];

        assert_eq!(status["lastFiredAt"], "2026-01-05T09:00:00Z");
        assert_eq!(status["observedGeneration"], 7);
    }

    #[test]
    fn patch_skips_keys_the_current_status_never_set() {
        let current = status_from(serde_json::json!({"phase": "Active"}));
        let patch =
            build_status_patch(Some(&current), &ScalingPhase::Cancelled, "Cancelled manually")
                .unwrap();
        let status = patch["status"].as_object().unwrap();
        assert_eq!(status.len(), 2, "unset optional fields must not appear: {status:?}");
    }
}
