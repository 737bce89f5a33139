//! Error types for deployment orchestration

use thiserror::Error;

/// Deployment orchestration error type.
///
/// Errors surfaced by the platform collaborator are carried verbatim: the
/// orchestrator never wraps or retries them, it flushes the warnings
/// collected up to the failing step and returns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployError {
    /// Error reported by the platform, propagated with its original message
    #[error("{0}")]
    Platform(String),

    /// Application lookup failed
    #[error("App '{name}' not found")]
    ApplicationNotFound { name: String },

    /// Rejected before any platform call: a rollout cannot replace zero
    /// instances at a time
    #[error("max-in-flight must be at least 1")]
    InvalidMaxInFlight,

    /// The staging feeds closed without producing a droplet or an error.
    /// The stage executor contract says this cannot happen for a call that
    /// runs to completion; surfaced instead of panicking.
    #[error("staging ended without a droplet")]
    StagingIncomplete,
}

impl DeployError {
    /// Shorthand for a raw platform failure
    pub fn platform(message: impl Into<String>) -> Self {
        DeployError::Platform(message.into())
    }
}

/// Result type for deployment operations
pub type Result<T, E = DeployError> = std::result::Result<T, E>;
