//! Error types for Newsdesk clients
//!
//! Provides a single error enum covering:
//! - Client-side validation (required fields, payload rules)
//! - Transport and non-2xx failures from the REST backend
//! - Strict schema decoding of response envelopes
//! - Error codes for machine-readable handling

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingField,

    // Authentication errors (2xxx)
    Unauthorized,

    // Authorization errors (3xxx)
    Forbidden,

    // Resource errors (4xxx)
    NotFound,

    // External service errors (8xxx)
    UpstreamError,
    TransportError,
    SchemaMismatch,
    UploadError,

    // Internal errors (9xxx)
    CacheError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingField => 1002,

            ErrorCode::Unauthorized => 2001,

            ErrorCode::Forbidden => 3001,

            ErrorCode::NotFound => 4001,

            ErrorCode::UpstreamError => 8001,
            ErrorCode::TransportError => 8002,
            ErrorCode::SchemaMismatch => 8003,
            ErrorCode::UploadError => 8004,

            ErrorCode::CacheError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    // Remote errors
    #[error("Request to {endpoint} failed with status {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response shape from {endpoint}: {message}")]
    Schema { endpoint: String, message: String },

    #[error("Image upload failed: {message}")]
    Upload { message: String },

    // Resource errors
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound { resource_type: String, id: String },

    // Internal errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingField { .. } => ErrorCode::MissingField,
            AppError::Status { status: 401, .. } => ErrorCode::Unauthorized,
            AppError::Status { status: 403, .. } => ErrorCode::Forbidden,
            AppError::Status { status: 404, .. } => ErrorCode::NotFound,
            AppError::Status { .. } => ErrorCode::UpstreamError,
            AppError::Transport(_) => ErrorCode::TransportError,
            AppError::Schema { .. } => ErrorCode::SchemaMismatch,
            AppError::Upload { .. } => ErrorCode::UploadError,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Cache { .. } => ErrorCode::CacheError,
            AppError::Configuration(_) => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Whether the failure happened before any request left the client
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::MissingField { .. }
        )
    }

    /// Text suitable for a user-visible notification
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingField { field } => format!("{} is required", field),
            AppError::Validation { message, .. } => message.clone(),
            AppError::Status { message, .. } if !message.is_empty() => message.clone(),
            AppError::Status { status, .. } => format!("Request failed ({})", status),
            AppError::Transport(_) => "Could not reach the server".to_string(),
            AppError::Schema { .. } => "The server sent an unexpected response".to_string(),
            AppError::Upload { .. } => "Image upload failed".to_string(),
            AppError::NotFound { resource_type, .. } => format!("{} not found", resource_type),
            AppError::Cache { .. }
            | AppError::Configuration(_)
            | AppError::Serialization(_) => "Something went wrong".to_string(),
        }
    }

    pub(crate) fn schema(endpoint: &str, err: impl std::fmt::Display) -> Self {
        AppError::Schema {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors.field_errors().keys().next().map(|f| f.to_string());
        AppError::Validation {
            message: errors.to_string(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::Status {
            endpoint: "/author/7".into(),
            status: 404,
            message: "author not found".into(),
        };
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.code().as_code(), 4001);
        assert_eq!(err.user_message(), "author not found");
    }

    #[test]
    fn test_missing_field_message() {
        let err = AppError::MissingField { field: "Email".into() };
        assert!(err.is_client_side());
        assert_eq!(err.user_message(), "Email is required");
    }

    #[test]
    fn test_schema_error_is_not_client_side() {
        let err = AppError::schema("/author/all", "missing field `email`");
        assert_eq!(err.code(), ErrorCode::SchemaMismatch);
        assert!(!err.is_client_side());
        assert!(err.to_string().contains("/author/all"));
    }
}
