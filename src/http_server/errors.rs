//! # API Errors
//!
//! Every failure leaves the service as the same envelope:
//! `{"success": false, "error": <status>, "message": <text>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Required body fields are absent, or the body is not a JSON object
    #[error("Bad request")]
    BadRequest { fields: Vec<String> },

    /// Empty result set or unknown resource
    #[error("Resource not found")]
    NotFound,

    /// Known path, unsupported method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Client does not accept JSON
    #[error("Not acceptable")]
    NotAcceptable,

    /// Fields are present but have the wrong shape
    #[error("Unprocessable")]
    Unprocessable { fields: Vec<String> },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Backing store failure
    #[error("Internal server error")]
    Internal(#[from] StoreError),

    /// Store work panicked or was cancelled on the blocking pool
    #[error("Internal server error")]
    Worker(#[from] JoinError),
}

impl ApiError {
    /// Malformed body with no specific field to blame
    pub fn bad_request() -> Self {
        ApiError::BadRequest { fields: Vec::new() }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error envelope body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let error = err.status_code().as_u16();
        let message = err.to_string();
        let fields = match err {
            ApiError::BadRequest { fields } | ApiError::Unprocessable { fields } => fields,
            _ => Vec::new(),
        };
        Self {
            success: false,
            error,
            message,
            fields,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(cause) => error!(error = %cause, "request failed in store"),
            ApiError::Worker(cause) => error!(error = %cause, "store task did not complete"),
            _ => {}
        }
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::bad_request().status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::NotAcceptable.status_code(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(
            ApiError::Unprocessable { fields: vec![] }.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Internal(StoreError::LockPoisoned).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ErrorResponse::from(ApiError::NotFound)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], 404);
        assert_eq!(json["message"], "Resource not found");
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn test_envelope_lists_fields() {
        let err = ApiError::BadRequest {
            fields: vec!["answer".to_string(), "difficulty".to_string()],
        };
        let json = serde_json::to_value(ErrorResponse::from(err)).unwrap();
        assert_eq!(json["error"], 400);
        assert_eq!(json["message"], "Bad request");
        assert_eq!(json["fields"], serde_json::json!(["answer", "difficulty"]));
    }

    #[tokio::test]
    async fn test_worker_panic_is_internal() {
        let join_err = tokio::task::spawn_blocking(|| panic!("store worker died"))
            .await
            .unwrap_err();
        let err = ApiError::from(join_err);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = serde_json::to_value(ErrorResponse::from(err)).unwrap();
        assert_eq!(json["error"], 500);
        assert_eq!(json["message"], "Internal server error");
    }

    #[test]
    fn test_internal_hides_cause() {
        let err = ApiError::from(StoreError::CorruptRow("secret detail".to_string()));
        let json = serde_json::to_value(ErrorResponse::from(err)).unwrap();
        assert_eq!(json["message"], "Internal server error");
    }
}
