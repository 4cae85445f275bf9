//! Emits the ScheduledScaling CRD manifest as YAML on stdout.
//!
//! Usage: `cargo run --bin crdgen > config/crd/scheduledscalings.yaml`

use anyhow::Result;
use kube::CustomResourceExt;

fn main() -> Result<()> {
    print!("{}", serde_yaml::to_string(&crds::ScheduledScaling::crd())?);
    Ok(())
}
