//! Store client errors

use thiserror::Error;

/// Errors that can occur when talking to the resource store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced resource does not exist in the store
    #[error("not found: {0}")]
    NotFound(String),

    /// Identity collision on create, or a concurrent-update conflict
    #[error("conflict: {0}")]
    Conflict(String),

    /// JSON serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request is malformed before it reaches the store (e.g., missing name)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other Kubernetes API failure (transport, auth, malformed response)
    #[error("Kubernetes API error: {0}")]
    Kube(#[source] kube::Error),
}

impl From<kube::Error> for StoreError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(ae) if ae.code == 404 => Self::NotFound(ae.message),
            kube::Error::Api(ae) if ae.code == 409 => Self::Conflict(ae.message),
            other => Self::Kube(other),
        }
    }
}
