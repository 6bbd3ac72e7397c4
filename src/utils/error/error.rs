//! Error handling for recordops
//!
//! This module defines all error types used throughout the crate.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Result type alias for recordops
pub type Result<T> = std::result::Result<T, RecordOpsError>;

/// Errors reported by a record store backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The record type/id pair does not exist
    #[error("Record does not exist: {record_type} {id}")]
    RecordNotFound { record_type: String, id: String },

    /// The record type itself is unknown to the store
    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    /// Any other rejection, carrying the store's own message
    #[error("{0}")]
    Rejected(String),
}

/// Main error type for recordops
#[derive(Error, Debug)]
pub enum RecordOpsError {
    /// A `fieldId=text` token without `=`
    #[error("Field assignment expected (fieldId=value): {0}")]
    MalformedAssignment(String),

    /// Select assignment mixing option ids and option texts
    #[error("All must be text or all must be IDs ({field}): {text}")]
    AmbiguousSelector { field: String, text: String },

    /// List value given to a single-valued field
    #[error("Single value expected ({field}): {text}")]
    MultiValueNotAllowed { field: String, text: String },

    /// Path shape not recognized
    #[error("Not supported: {0}")]
    UnsupportedPath(String),

    /// Line query matched no line
    #[error("Sublist line not found: {0}")]
    LineNotFound(String),

    /// Line query matched several lines
    #[error("Multiple matching sublist lines ({lines}): {query}")]
    AmbiguousLine { query: String, lines: String },

    /// Numeric line index outside the candidate set
    #[error("Line {index} is out of range ({count} candidates)")]
    LineOutOfRange { index: String, count: usize },

    /// Unknown sublist id
    #[error("Sublist not found: {0}")]
    SublistNotFound(String),

    /// Unknown field id
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Action not applicable at the given location
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// Bad argument value (e.g. non-boolean ignoreRecalc)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Record store rejected an operation
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Non-200 or unparsable response from the command endpoint
    #[error("Remote transport error: {0}")]
    RemoteTransport(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server errors
    #[error("Server error: {0}")]
    Server(String),
}

impl RecordOpsError {
    /// Create a server error
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error came from parsing or resolving operator input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedAssignment(_)
                | Self::AmbiguousSelector { .. }
                | Self::MultiValueNotAllowed { .. }
                | Self::UnsupportedPath(_)
                | Self::LineNotFound(_)
                | Self::AmbiguousLine { .. }
                | Self::LineOutOfRange { .. }
                | Self::SublistNotFound(_)
                | Self::FieldNotFound(_)
                | Self::UnsupportedAction(_)
                | Self::InvalidArgument(_)
        )
    }

    /// Text reported as a single task's result
    pub fn to_task_result(&self) -> String {
        format!("Error: {}", self)
    }
}

impl ResponseError for RecordOpsError {
    fn status_code(&self) -> StatusCode {
        match self {
            _ if self.is_input_error() => StatusCode::BAD_REQUEST,
            RecordOpsError::Store(StoreError::RecordNotFound { .. }) => StatusCode::NOT_FOUND,
            RecordOpsError::Store(StoreError::InvalidRecordType(_)) => StatusCode::NOT_FOUND,
            RecordOpsError::Store(_) | RecordOpsError::RemoteTransport(_) => {
                StatusCode::BAD_GATEWAY
            }
            RecordOpsError::Serialization(_) | RecordOpsError::Yaml(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_task_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_result_prefix() {
        let err = RecordOpsError::SublistNotFound("item".to_string());
        assert_eq!(err.to_task_result(), "Error: Sublist not found: item");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: RecordOpsError = StoreError::Rejected("INSUFFICIENT_PERMISSION".to_string()).into();
        assert_eq!(err.to_string(), "INSUFFICIENT_PERMISSION");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RecordOpsError::MalformedAssignment("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        let missing: RecordOpsError = StoreError::RecordNotFound {
            record_type: "customer".to_string(),
            id: "1".to_string(),
        }
        .into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            RecordOpsError::server("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_body_is_plain_text() {
        let response = RecordOpsError::UnsupportedPath("[\"a\",\"b\",\"c\"]".to_string())
            .error_response();
        assert_eq!(response.status().as_u16(), 400);
        let content_type = response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
    }
}
