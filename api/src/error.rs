//! Error handling for the HTTP API
//!
//! Maps core errors onto `{"error": ...}` responses. Driver detail is logged
//! server-side and never sent to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::TodoError;

use crate::serialization::ErrorResponse;

/// Errors surfaced by request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required input is missing or malformed; the message is safe to echo
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A repository call failed while serving `operation`
    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        public_message: &'static str,
        #[source]
        source: TodoError,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Build a `map_err` adapter for a repository call
    ///
    /// ```rust
    /// use todo_api::ApiError;
    /// use todo_core::TodoError;
    ///
    /// let result: Result<(), TodoError> = Err(TodoError::Database("gone".to_string()));
    /// let error = result
    ///     .map_err(ApiError::operation("GET /todos", "Failed to fetch todos"))
    ///     .unwrap_err();
    /// assert_eq!(error.public_message(), "Failed to fetch todos");
    /// ```
    pub fn operation(
        operation: &'static str,
        public_message: &'static str,
    ) -> impl FnOnce(TodoError) -> Self {
        move |source| Self::Operation {
            operation,
            public_message,
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message placed in the response body
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::BadRequest(message) => message,
            ApiError::Operation { public_message, .. } => public_message,
        }
    }
}

/// Validation failures keep their message; anything else is an internal error
impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(message) => ApiError::BadRequest(message),
            other => ApiError::Operation {
                operation: "request",
                public_message: "Internal server error",
                source: other,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadRequest(message) => {
                tracing::debug!(error = %message, "Rejected request");
            }
            ApiError::Operation {
                operation, source, ..
            } => {
                tracing::error!(operation = %operation, error = %source, "{operation} error");
            }
        }

        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let error = ApiError::from(TodoError::missing_field("user_id"));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.public_message(), "user_id is required");
    }

    #[test]
    fn test_operation_hides_driver_detail() {
        let error = ApiError::operation("POST /todos", "Insert failed")(TodoError::Database(
            "Access denied for user 'root'@'10.0.0.3'".to_string(),
        ));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), "Insert failed");
        assert!(error.to_string().contains("Access denied"));
    }

    #[test]
    fn test_other_core_errors_are_internal() {
        let error = ApiError::from(TodoError::Configuration("pool closed".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), "Internal server error");
    }
}
