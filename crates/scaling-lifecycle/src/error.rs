//! Lifecycle-specific error types.
//!
//! Validation failures happen before any store access and never leave a
//! partial write behind; store failures pass through from the client layer.

use scaling_client::StoreError;
use thiserror::Error;

/// Errors that can occur while applying a manual transition.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// Store failure (not found, conflict, transport)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Action string is neither "cancel" nor "revert"
    #[error("invalid action \"{0}\", use 'cancel' or 'revert'")]
    UnknownAction(String),

    /// Revert requested on a directive that is not Active
    #[error("not active, cannot revert")]
    NotActive,
}

impl TransitionError {
    /// True when the request failed validation before any store access.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::UnknownAction(_) | Self::NotActive)
    }
}
