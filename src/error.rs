//! Error handling for the surfacemap scanner
//!
//! Three classes of failure exist. Precondition violations (bad target or
//! port bounds) are rejected before any socket is opened. Probe transport
//! errors are absorbed by the scan engine and never surface from `scan`.
//! Everything else is an internal error that aborts the scan.

use thiserror::Error;

/// Main error type for scanning and assessment operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Port range error: {0}")]
    PortRangeError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// True for errors raised before any network activity because the
    /// caller supplied an unusable target or port range.
    pub fn is_precondition(&self) -> bool {
        matches!(self, ScanError::InvalidTarget(_) | ScanError::PortRangeError(_))
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::OutputError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ScanError {
    fn from(err: tokio::task::JoinError) -> Self {
        ScanError::Internal(format!("scan worker terminated abnormally: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_classification() {
        assert!(ScanError::InvalidTarget("x".into()).is_precondition());
        assert!(ScanError::PortRangeError("x".into()).is_precondition());
        assert!(!ScanError::Internal("x".into()).is_precondition());
        assert!(!ScanError::Network("x".into()).is_precondition());
        assert!(!ScanError::ConfigError("x".into()).is_precondition());
    }

    #[test]
    fn test_error_messages() {
        let err = ScanError::PortRangeError("start_port (10) must not exceed end_port (5)".into());
        assert_eq!(
            err.to_string(),
            "Port range error: start_port (10) must not exceed end_port (5)"
        );

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: ScanError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
