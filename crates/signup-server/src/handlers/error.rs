//! Mapping of handler failures to HTTP responses

use crate::validation::{ValidationError, ValidationResult};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use signup_core::SignupError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", .0.message())]
    Validation(ValidationResult),

    /// A submission could not be stored
    #[error("Storage unavailable")]
    Submit(#[source] SignupError),

    /// A listing could not be read; the message is shown to the client
    #[error("{message}")]
    Fetch {
        message: &'static str,
        #[source]
        source: SignupError,
    },
}

impl ApiError {
    pub fn invalid_body(message: impl Into<String>) -> Self {
        ApiError::Validation(ValidationResult::ok().with_error(ValidationError::invalid_body(message)))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(result) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": self.to_string(),
                    "details": result.errors,
                })),
            )
                .into_response(),
            ApiError::Submit(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": self.to_string(),
                })),
            )
                .into_response(),
            ApiError::Fetch { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}
