//! Mapping of order errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde_json::json;

use order_common::OrderError;

/// Error returned by handlers.
///
/// Validation failures become `400 {"<field>": ["<message>"]}`; everything
/// else becomes `{"detail": "<message>"}` with the error's status code.
#[derive(Debug)]
pub struct ApiError(pub OrderError);

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    /// Error for a request body that is not valid JSON for the expected shape.
    pub fn malformed_body(message: impl Into<String>) -> Self {
        ApiError(OrderError::validation("non_field_errors", message))
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        ApiError(OrderError::NotFound(what.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.0 {
            OrderError::Validation { field, message } => {
                counter!("order_validation_failures_total", "field" => field.clone()).increment(1);
                tracing::debug!(field = %field, "Rejected order request: {}", message);
                let mut errors = serde_json::Map::new();
                errors.insert(field.clone(), json!([message]));
                serde_json::Value::Object(errors)
            }
            OrderError::NotFound(message) => json!({ "detail": message }),
            other => {
                tracing::error!(error = %other, "Request failed");
                json!({ "detail": other.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
