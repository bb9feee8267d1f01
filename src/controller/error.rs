//! Error types for status updates.
//!
//! Defines the error taxonomy with classification for retry behavior. The
//! updater never retries on its own; the calling reconciliation loop uses
//! [`Error::is_retryable`] and [`Error::requeue_after`] to decide.

use std::time::Duration;
use thiserror::Error;

/// Error type for status operations
#[derive(Error, Debug)]
pub enum Error {
    /// Resource kind is not registered with the updater
    #[error("Unsupported resource kind: {0}")]
    UnsupportedKind(String),

    /// Resource no longer exists in the API server
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Status write rejected because the resource version is stale
    #[error("Conflict updating status of {0}")]
    Conflict(String),

    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// Missing required field in resource
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error indicates a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
            || matches!(self, Error::Kube(kube::Error::Api(e)) if e.code == 404)
    }

    /// Check if this error is an optimistic concurrency conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
            || matches!(self, Error::Kube(kube::Error::Api(e)) if e.code == 409)
    }

    /// Check if the remote store rejected or failed the request
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Conflict(_) | Error::Kube(_))
    }

    /// Check if this error should be retried
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Kube(e) => {
                // Retry on network errors, rate limiting, and server errors
                matches!(
                    e,
                    kube::Error::Api(api_err) if api_err.code >= 500 || api_err.code == 429
                ) || matches!(e, kube::Error::Service(_))
            }
            Error::Conflict(_) => true,
            Error::UnsupportedKind(_) | Error::NotFound(_) | Error::MissingField(_) => false,
            Error::Serialization(_) => false,
        }
    }

    /// Get the recommended requeue duration for this error
    pub fn requeue_after(&self) -> Duration {
        if self.is_conflict() {
            // A fresh read usually succeeds right away
            Duration::from_secs(1)
        } else if self.is_retryable() {
            Duration::from_secs(30)
        } else {
            Duration::from_secs(3600)
        }
    }
}

/// Result type alias for status operations
pub type Result<T> = std::result::Result<T, Error>;
