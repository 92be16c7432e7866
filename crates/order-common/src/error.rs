//! Error types for the order services.

use thiserror::Error;

/// Result type alias using OrderError.
pub type OrderResult<T> = Result<T, OrderError>;

/// Primary error type for order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    // === Request Errors ===
    /// A user supplied value failed validation. `field` names the offending
    /// request field (`layer`, `format`, `bbox`, ...).
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    // === Backend Errors ===
    #[error("Order submission failed: {0}")]
    Submission(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    // === Infrastructure Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl OrderError {
    /// Build a field scoped validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OrderError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The request field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            OrderError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            OrderError::Validation { .. } => 400,
            OrderError::NotFound(_) => 404,
            OrderError::Submission(_) => 502,
            OrderError::DatabaseError(_)
            | OrderError::InvalidConfiguration(_)
            | OrderError::InternalError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for OrderError {
    fn from(err: serde_json::Error) -> Self {
        OrderError::InternalError(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_field() {
        let err = OrderError::validation("bbox", "Invalid numeric values");
        assert_eq!(err.field(), Some("bbox"));
        assert_eq!(err.http_status_code(), 400);
        assert!(err.to_string().contains("bbox"));
    }

    #[test]
    fn test_server_side_errors() {
        assert_eq!(OrderError::InternalError("x".into()).http_status_code(), 500);
        assert_eq!(
            OrderError::InvalidConfiguration("x".into()).http_status_code(),
            500
        );
        assert_eq!(OrderError::Submission("x".into()).http_status_code(), 502);
        assert!(OrderError::InternalError("x".into()).field().is_none());
    }
}
