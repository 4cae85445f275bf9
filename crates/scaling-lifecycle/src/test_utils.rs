//! Test utilities for lifecycle unit tests
//!
//! Helpers for creating test directives and preloading status documents.

use crds::{ScalingSpec, ScheduleSpec, ScheduledScaling, ScheduledScalingSpec, TargetRef};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Helper to create a test ScheduledScaling with no status
pub fn test_directive(name: &str, namespace: &str) -> ScheduledScaling {
    let mut directive = ScheduledScaling::new(
        name,
        ScheduledScalingSpec {
            target_ref: TargetRef {
                api_version: Some("autoscaling/v2".to_string()),
                kind: "HorizontalPodAutoscaler".to_string(),
                name: "web".to_string(),
                namespace: None,
            },
            schedule: ScheduleSpec::default(),
            scaling: ScalingSpec {
                min_replicas: Some(2),
                max_replicas: Some(10),
            },
            revert: true,
        },
    );
    directive.metadata = ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    };
    directive
}

/// Helper to create a test ScheduledScaling with a status document given
/// as JSON (so tests can set reconciler-owned and unmodeled keys alike)
pub fn directive_with_status(
    name: &str,
    namespace: &str,
    status: Option<serde_json::Value>,
) -> ScheduledScaling {
    let mut directive = test_directive(name, namespace);
    directive.status = status.map(|value| {
        serde_json::from_value(value).unwrap_or_else(|e| panic!("bad test status: {e}"))
    });
    directive
}
