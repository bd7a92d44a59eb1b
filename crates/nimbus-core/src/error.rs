//! Error types module
//!
//! Application-level errors and the metadata used to render them at the
//! HTTP boundary. Variants carry a detail string that is logged but, for
//! provider-side failures, never forwarded to callers.

/// Log level hint for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Warn,
    Error,
}

/// How an error renders at the HTTP boundary.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message. Caller mistakes echo their detail; provider
    /// failures collapse to a fixed phrase.
    fn client_message(&self) -> String;

    /// Severity to log this error at
    fn log_level(&self) -> LogLevel;
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Listing failed: {0}")]
    List(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::NotFound(_) => 404,
            AppError::Upload(_)
            | AppError::List(_)
            | AppError::Fetch(_)
            | AppError::Delete(_)
            | AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "INVALID_INPUT",
            AppError::PayloadTooLarge(_) => "FILE_TOO_LARGE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Upload(_) => "UPLOAD_ERROR",
            AppError::List(_) => "LIST_ERROR",
            AppError::Fetch(_) => "FETCH_ERROR",
            AppError::Delete(_) => "DELETE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::PayloadTooLarge(_) => "File too large".to_string(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::Upload(_) => "Upload failed".to_string(),
            AppError::List(_) => "List failed".to_string(),
            AppError::Fetch(_) => "Get file failed".to_string(),
            AppError::Delete(_) => "Delete failed".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) | AppError::NotFound(_) => LogLevel::Debug,
            AppError::PayloadTooLarge(_) => LogLevel::Warn,
            AppError::Upload(_)
            | AppError::List(_)
            | AppError::Fetch(_)
            | AppError::Delete(_)
            | AppError::Internal(_) => LogLevel::Error,
        }
    }
}
