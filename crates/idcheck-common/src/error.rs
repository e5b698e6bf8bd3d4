//! Common error types for IDCheck components.

use thiserror::Error;

use crate::constants::messages;

/// Errors surfaced by a verification request
#[derive(Debug, Error)]
pub enum VerifyError {
    /// No identifier-shaped text was found in the image
    #[error("{}", messages::EXTRACTION_FAILED)]
    ExtractionFailed,

    /// Missing or malformed form input
    #[error("{0}")]
    InvalidInput(String),

    /// Upload exceeds the configured body limit
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The operator-configured request timeout elapsed
    #[error("{}", messages::REQUEST_TIMED_OUT)]
    Timeout,

    /// Scratch storage failure (write, permissions, disk full)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VerifyError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ExtractionFailed => 400,
            Self::InvalidInput(_) => 422,
            Self::PayloadTooLarge(_) => 413,
            Self::Timeout => 408,
            Self::Storage(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Message safe to show to the caller.
    ///
    /// Server-side failures are reported generically; the cause only goes to the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::ExtractionFailed
            | Self::InvalidInput(_)
            | Self::PayloadTooLarge(_)
            | Self::Timeout => self.to_string(),
            Self::Storage(_) | Self::Internal(_) => messages::INTERNAL_ERROR.to_string(),
        }
    }

    /// Returns true if this error is the server's fault
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failed_is_client_error() {
        let err = VerifyError::ExtractionFailed;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "Could not extract PAN number from the image.");
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_timeout_is_request_timeout() {
        let err = VerifyError::Timeout;
        assert_eq!(err.status_code(), 408);
        assert_eq!(err.public_message(), "Request timed out");
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_storage_error_hides_cause() {
        let err = VerifyError::Storage("No space left on device".to_string());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("No space left"));
    }
}
