//! ScheduledScaling CRD
//!
//! Declares a time-scoped scaling directive against a target workload.
//! The reconciler applies the replica bounds when the schedule fires and
//! restores the original bounds afterwards when `revert` is set.

use std::collections::BTreeMap;
use std::fmt;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "scaling.microscaler.io",
    version = "v1alpha1",
    kind = "ScheduledScaling",
    namespaced,
    status = "ScheduledScalingStatus",
    shortname = "ss"
)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledScalingSpec {
    /// Workload whose replica bounds are scaled
    pub target_ref: TargetRef,

    /// When the scaling applies (one-shot window and/or recurrence)
    pub schedule: ScheduleSpec,

    /// Replica bounds to apply while active
    pub scaling: ScalingSpec,

    /// Restore the original bounds when the window/recurrence ends
    #[serde(default)]
    pub revert: bool,
}

/// Reference to the workload being scaled.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TargetRef {
    /// API version of the target (e.g., "autoscaling/v2")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Kind of the target (e.g., "HorizontalPodAutoscaler")
    pub kind: String,

    /// Name of the target workload
    pub name: String,

    /// Namespace (defaults to same namespace as the ScheduledScaling)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSpec {
    /// Start of a one-shot scaling window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,

    /// End of a one-shot scaling window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,

    /// Recurring schedule; may coexist with a one-shot window, the
    /// reconciler owns precedence between the two
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceSpec>,
}

/// Cron-like recurring schedule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceSpec {
    /// Cron expression (e.g., "0 9 * * 1-5")
    pub schedule: String,

    /// How long the scaling stays applied after each firing (e.g., "8h")
    pub duration: String,

    /// IANA timezone for the cron expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Deadline in seconds for starting a missed firing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_deadline_seconds: Option<i64>,

    /// How many successful firings to keep in history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_jobs_history_limit: Option<i32>,

    /// How many failed firings to keep in history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_jobs_history_limit: Option<i32>,
}

/// Replica bounds applied to the target while the directive is active.
///
/// An unset bound means "leave the current bound unchanged".
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScalingSpec {
    /// Minimum replicas while active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i32>,

    /// Maximum replicas while active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<i32>,
}

/// Status written jointly by the reconciler and the manual transition
/// handler.
///
/// Keys this core does not model are captured in `extra` and must survive
/// a status patch verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledScalingStatus {
    /// Lifecycle phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub phase: Option<ScalingPhase>,

    /// When the reconciler applied the scaling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When the reconciler restored the original bounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverted_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Target's minReplicas before activation, required for revert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_min_replicas: Option<i32>,

    /// Target's maxReplicas before activation, required for revert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_max_replicas: Option<i32>,

    /// Human-readable status explanation, overwritten by every transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Status keys written by other owners, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Lifecycle phase of a ScheduledScaling.
///
/// Serializes as the phase string ("Pending", "Active", "Cancelled").
/// Phases written by a newer reconciler that this crate does not model
/// round-trip verbatim through `Other` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScalingPhase {
    /// Created, waiting for the schedule to fire
    Pending,

    /// Scaling currently applied to the target
    Active,

    /// Cancelled manually; no further manual transition is accepted
    Cancelled,

    /// Phase string this crate does not recognize
    Other(String),
}

impl ScalingPhase {
    /// Phase as the wire string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Cancelled => "Cancelled",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ScalingPhase {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Pending" => Self::Pending,
            "Active" => Self::Active,
            "Cancelled" => Self::Cancelled,
            _ => Self::Other(s),
        }
    }
}

impl From<ScalingPhase> for String {
    fn from(phase: ScalingPhase) -> Self {
        phase.as_str().to_string()
    }
}

impl fmt::Display for ScalingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScheduledScaling {
    /// Namespace the target workload lives in: the targetRef namespace if
    /// set, otherwise the directive's own namespace.
    pub fn target_namespace(&self) -> Option<&str> {
        self.spec
            .target_ref
            .namespace
            .as_deref()
            .or(self.metadata.namespace.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[test]
    fn phase_round_trips_known_strings() {
        for s in ["Pending", "Active", "Cancelled"] {
            let phase = ScalingPhase::from(s.to_string());
            assert_eq!(phase.as_str(), s);
            assert!(!matches!(phase, ScalingPhase::Other(_)));
        }
    }

    #[test]
    fn phase_preserves_unknown_strings() {
        let phase = ScalingPhase::from("Expired".to_string());
        assert_eq!(phase, ScalingPhase::Other("Expired".to_string()));
        assert_eq!(String::from(phase), "Expired");
    }

    #[test]
    fn status_deserializes_camel_case() {
        let status: ScheduledScalingStatus = serde_json::from_value(serde_json::json!({
            "phase": "Active",
            "appliedAt": "2026-01-05T09:00:00Z",
            "originalMinReplicas": 1,
            "conditions": [{"type": "Ready", "status": "True"}]
        }))
        .unwrap();

        assert_eq!(status.phase, Some(ScalingPhase::Active));
        assert_eq!(status.original_min_replicas, Some(1));
        // Unmodeled keys land in the extension map
        assert!(status.extra.contains_key("conditions"));
    }

    #[test]
    fn status_serialization_skips_unset_fields() {
        let status = ScheduledScalingStatus {
            phase: Some(ScalingPhase::Pending),
            ..Default::default()
        };
        let value = serde_json::to_value(&status).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1, "only phase should be serialized: {obj:?}");
        assert_eq!(obj["phase"], "Pending");
    }

    #[test]
    fn status_extra_keys_round_trip() {
        let doc = serde_json::json!({
            "phase": "Active",
            "lastFiredAt": "2026-01-05T09:00:00Z",
            "observedGeneration": 3
        });
        let status: ScheduledScalingStatus = serde_json::from_value(doc.clone()).unwrap();
        let back = serde_json::to_value(&status).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn target_namespace_falls_back_to_directive_namespace() {
        let mut ss = ScheduledScaling::new(
            "demo",
            ScheduledScalingSpec {
                target_ref: TargetRef {
                    api_version: Some("autoscaling/v2".to_string()),
                    kind: "HorizontalPodAutoscaler".to_string(),
                    name: "web".to_string(),
                    namespace: None,
                },
                schedule: ScheduleSpec::default(),
                scaling: ScalingSpec::default(),
                revert: false,
            },
        );
        ss.metadata = ObjectMeta {
            name: Some("demo".to_string()),
            namespace: Some("ns1".to_string()),
            ..Default::default()
        };
        assert_eq!(ss.target_namespace(), Some("ns1"));

        ss.spec.target_ref.namespace = Some("prod".to_string());
        assert_eq!(ss.target_namespace(), Some("prod"));
    }
}
