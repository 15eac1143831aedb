//! Shared API types
//!
//! Error envelope and parameter validators used by all endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::ValidationError;

use crate::domain::query::QueryError;

/// Validator function for the row limit parameter (0 means unlimited)
pub fn validate_limit(limit: f64) -> Result<(), ValidationError> {
    if !limit.is_finite() || limit < 0.0 {
        return Err(ValidationError::new("limit_range")
            .with_message("Limit must be a finite number >= 0".into()));
    }
    Ok(())
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    /// The LQL client failed or answered with something unusable
    BadGateway { code: String, message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_gateway(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadGateway {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidFilter(_) => Self::bad_request("INVALID_FILTER", e.to_string()),
            // Already logged by the query service
            QueryError::Client(_) => Self::bad_gateway("UPSTREAM_ERROR", e.to_string()),
            QueryError::MissingColumnName { .. } => {
                tracing::error!(error = %e, "Malformed column listing from LQL client");
                Self::bad_gateway("UPSTREAM_ERROR", e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::BadGateway { code, message } => {
                (StatusCode::BAD_GATEWAY, "bad_gateway", code, message)
            }
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}
