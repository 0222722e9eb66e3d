use thiserror::Error;

use super::user::FieldErrors;

/// Core domain errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A mutation payload failed one or more field rules. Never sent over
    /// the network.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The remote system rejected or never received a request. Recoverable
    /// by user retry; never retried automatically.
    #[error("transport error: {message}")]
    Transport {
        /// HTTP status, when the failure was a non-2xx response rather than
        /// a connection-level error.
        status: Option<u16>,
        message: String,
    },

    /// Internal invariant violation in the query store. Not user-recoverable.
    #[error("cache inconsistency: {message}")]
    CacheInconsistency { message: String },
}

impl DomainError {
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn cache_inconsistency(message: impl Into<String>) -> Self {
        Self::CacheInconsistency {
            message: message.into(),
        }
    }

    /// HTTP status of a transport failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}
