//! Integrity Error Types

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type IntegrityResult<T> = Result<T, IntegrityError>;

#[derive(Debug, Error)]
pub enum IntegrityError {
    /// Secure randomness or digest primitive missing. Fatal for the call.
    #[error("Cryptographic primitive unavailable: {0}")]
    CryptoUnavailable(String),

    /// Payload could not be turned into JSON. Server-side values only, never client input.
    #[error("Payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A value could not be used as an HTTP header
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Transport-level failure talking to the edge function
    #[error("Edge function request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The edge function answered with a non-success status
    #[error("Edge function returned {status}: {body}")]
    Upstream { status: u16, body: String },
}

impl IntegrityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IntegrityError::CryptoUnavailable(_) => ErrorKind::ServiceUnavailable,
            IntegrityError::Serialization(_) => ErrorKind::InternalServerError,
            IntegrityError::InvalidHeader(_) => ErrorKind::InternalServerError,
            IntegrityError::Transport(_) | IntegrityError::Upstream { .. } => {
                ErrorKind::BadGateway
            }
        }
    }

    fn log(&self) {
        match self {
            IntegrityError::CryptoUnavailable(reason) => {
                tracing::error!(reason = %reason, "Request signing aborted");
            }
            IntegrityError::Transport(e) => {
                tracing::warn!(error = %e, "Edge function transport error");
            }
            IntegrityError::Upstream { status, .. } => {
                tracing::warn!(status = status, "Edge function returned error status");
            }
            _ => {
                tracing::debug!(error = %self, "Integrity error");
            }
        }
    }
}

impl From<platform::crypto::RandomUnavailable> for IntegrityError {
    fn from(err: platform::crypto::RandomUnavailable) -> Self {
        IntegrityError::CryptoUnavailable(err.to_string())
    }
}

impl From<IntegrityError> for AppError {
    fn from(err: IntegrityError) -> Self {
        err.log();
        let kind = err.kind();
        // Upstream bodies may carry details that should not leak to clients
        if let IntegrityError::Upstream { status, .. } = err {
            return AppError::new(kind, format!("Edge function returned {status}"));
        }
        let message = err.to_string();
        AppError::new(kind, message).with_source(err)
    }
}
