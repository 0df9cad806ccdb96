//! HTTP error mapping.
//!
//! When the brokerage answered with an error, its status and body flow back
//! to the client verbatim; failures on the way there or back surface as a
//! 500 with a message envelope. Validation stops requests before any
//! upstream call and always answers 400.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::ports::GatewayError;
use crate::domain::ValidationError;

/// Failures surfaced by the REST layer.
#[derive(Debug)]
pub enum ApiError {
    /// Request body could not be deserialized.
    BadRequest(String),
    /// Request failed validation before any upstream call.
    Validation(ValidationError),
    /// Upstream call failed.
    Gateway(GatewayError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => error_body(StatusCode::BAD_REQUEST, &message),
            Self::Validation(err) => error_body(StatusCode::BAD_REQUEST, &err.to_string()),
            Self::Gateway(err) => gateway_response(&err),
        }
    }
}

fn gateway_response(err: &GatewayError) -> Response {
    match err {
        GatewayError::Upstream {
            status,
            message,
            body,
        } => {
            tracing::warn!(status = *status, message = %message, "upstream call failed");
            let status =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            body.as_ref().map_or_else(
                || error_body(status, message),
                |body| (status, Json(body.clone())).into_response(),
            )
        }
        GatewayError::Transport { .. } | GatewayError::Decode { .. } => {
            tracing::error!(error = %err, "gateway call failed without an upstream response");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
