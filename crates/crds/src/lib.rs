//! ScheduledScaling CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for time-scoped scaling
//! directives.

pub mod scheduled_scaling;

pub use scheduled_scaling::*;
