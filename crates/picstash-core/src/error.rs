//! Error types module
//!
//! This module provides the error types used throughout the Picstash client.
//! All workflow errors are unified under the `AppError` enum, which can
//! represent validation, upload, and registration faults.

use std::io;

use crate::validation::FieldError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like upload faults
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] FieldError),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Registration failed: {0}")]
    Registration(String),

    #[error("No uploaded image to register")]
    UploadNotReady,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl AppError {
    /// Get the error type name for logging and diagnostics
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::Upload(_) => "Upload",
            AppError::Registration(_) => "Registration",
            AppError::UploadNotReady => "UploadNotReady",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Whether the operation may succeed if retried by the user
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Upload(_)
                | AppError::Registration(_)
                | AppError::Internal(_)
                | AppError::InternalWithSource { .. }
        )
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) | AppError::UploadNotReady | AppError::InvalidInput(_) => {
                LogLevel::Debug
            }
            AppError::Upload(_) => LogLevel::Warn,
            AppError::Registration(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }

    /// Client-facing message (may differ from internal error message)
    pub fn client_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::Upload(_) => "Failed to upload image".to_string(),
            AppError::Registration(_) => "Failed to add image, try again later".to_string(),
            AppError::UploadNotReady => "Image not yet uploaded".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal error".to_string()
            }
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_registration() {
        let err = AppError::Registration("connection reset".to_string());
        assert_eq!(err.error_type(), "Registration");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to add image, try again later");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_upload_not_ready() {
        let err = AppError::UploadNotReady;
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Image not yet uploaded");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_validation() {
        let err = AppError::from(FieldError::MissingFile);
        assert_eq!(err.error_type(), "Validation");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "File is required");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_detailed_message_chain() {
        let source = anyhow::anyhow!("socket closed").context("request failed");
        let err = AppError::from(source);
        let details = err.detailed_message();
        assert!(details.contains("Caused by"));
        assert!(details.contains("socket closed"));
    }
}
