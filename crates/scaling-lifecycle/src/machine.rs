//! Phase state machine for manual transitions.
//!
//! Two manual transitions exist, both landing in `Cancelled`:
//!
//! - `cancel` is accepted from every phase, including an already-cancelled
//!   directive (observed behavior of the reconciler's control plane;
//!   repeat cancels are idempotent).
//! - `revert` is accepted only while the directive is exactly `Active`,
//!   since reverting needs the original bounds the reconciler snapshots
//!   at activation.

use crate::error::TransitionError;
use crds::ScalingPhase;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Manual transition requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionAction {
    /// Stop the directive regardless of its phase
    Cancel,

    /// Stop an Active directive and restore the original bounds
    Revert,
}

impl TransitionAction {
    /// Parse the wire string; anything but "cancel"/"revert" fails
    /// validation before any store access.
    pub fn parse(s: &str) -> Result<Self, TransitionError> {
        match s {
            "cancel" => Ok(Self::Cancel),
            "revert" => Ok(Self::Revert),
            other => Err(TransitionError::UnknownAction(other.to_string())),
        }
    }

    /// Action as the wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cancel => "cancel",
            Self::Revert => "revert",
        }
    }

    /// Phase every manual transition lands in.
    pub fn target_phase(self) -> ScalingPhase {
        ScalingPhase::Cancelled
    }

    /// Status message the transition writes.
    pub fn message(self, batch: bool) -> &'static str {
        match (self, batch) {
            (Self::Cancel, false) => "Cancelled manually",
            (Self::Cancel, true) => "Cancelled manually (batch)",
            (Self::Revert, false) => "Reverting manually",
            (Self::Revert, true) => "Reverting manually (batch)",
        }
    }
}

impl FromStr for TransitionAction {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether `action` is legal from the current phase.
///
/// Returns without error for `cancel` in every phase. `revert` requires
/// the phase to be exactly `Active`; an unset phase counts as Pending.
pub fn validate_transition(
    action: TransitionAction,
    phase: Option<&ScalingPhase>,
) -> Result<(), TransitionError> {
    match action {
        TransitionAction::Cancel => Ok(()),
        TransitionAction::Revert => {
            if phase == Some(&ScalingPhase::Active) {
                Ok(())
            } else {
                Err(TransitionError::NotActive)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_strings() {
        assert_eq!(TransitionAction::parse("cancel").unwrap(), TransitionAction::Cancel);
        assert_eq!(TransitionAction::parse("revert").unwrap(), TransitionAction::Revert);
    }

    #[test]
    fn rejects_unknown_action_strings() {
        for bad in ["pause", "Cancel", "REVERT", ""] {
            let err = TransitionAction::parse(bad).unwrap_err();
            assert!(err.is_validation(), "{bad:?} should fail validation");
            assert!(matches!(err, TransitionError::UnknownAction(_)));
        }
    }

    #[test]
    fn cancel_is_legal_from_every_phase() {
        let phases = [
            None,
            Some(ScalingPhase::Pending),
            Some(ScalingPhase::Active),
            Some(ScalingPhase::Cancelled),
            Some(ScalingPhase::Other("Expired".to_string())),
        ];
        for phase in &phases {
            assert!(validate_transition(TransitionAction::Cancel, phase.as_ref()).is_ok());
        }
    }

    #[test]
    fn revert_requires_active() {
        assert!(
            validate_transition(TransitionAction::Revert, Some(&ScalingPhase::Active)).is_ok()
        );

        let rejected = [
            None,
            Some(ScalingPhase::Pending),
            Some(ScalingPhase::Cancelled),
            Some(ScalingPhase::Other("Expired".to_string())),
        ];
        for phase in &rejected {
            let err = validate_transition(TransitionAction::Revert, phase.as_ref()).unwrap_err();
            assert!(matches!(err, TransitionError::NotActive), "phase {phase:?}");
            assert_eq!(err.to_string(), "not active, cannot revert");
        }
    }

    #[test]
    fn messages_carry_batch_suffix() {
        assert_eq!(TransitionAction::Cancel.message(false), "Cancelled manually");
        assert_eq!(TransitionAction::Cancel.message(true), "Cancelled manually (batch)");
        assert_eq!(TransitionAction::Revert.message(false), "Reverting manually");
        assert_eq!(TransitionAction::Revert.message(true), "Reverting manually (batch)");
    }

    #[test]
    fn action_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(TransitionAction::Cancel).unwrap(),
            serde_json::json!("cancel")
        );
        let action: TransitionAction = serde_json::from_value(serde_json::json!("revert")).unwrap();
        assert_eq!(action, TransitionAction::Revert);
    }
}
