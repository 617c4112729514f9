//! REST API error types
//!
//! Every defined failure kind maps to a 4xx response; raw decode and
//! lookup errors are converted before they reach handlers. Tenant
//! denial has its own body shape that clients branch on.

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use edurise_auth::AuthError;
use edurise_db::DbError;
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "DUPLICATE_EMAIL")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Tenant denial body - distinct shape so clients can branch between
/// tenant switching and re-authentication
#[derive(Debug, Serialize)]
pub struct TenantAccessDeniedResponse {
    pub success: bool,
    pub message: String,
    pub error_code: &'static str,
    pub timestamp: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Registration conflict on an existing email (400)
    #[error("Email already registered {location}")]
    DuplicateEmail { location: ErrorLocation },

    /// Uniform authentication failure (401). Deliberately carries no
    /// detail: wrong password, unknown account, bad/expired token and
    /// deactivated user are indistinguishable to the client.
    #[error("Invalid credentials {location}")]
    InvalidCredential { location: ErrorLocation },

    /// Authenticated but no membership in the resolved tenant (403)
    #[error("Tenant access denied: {message} {location}")]
    TenantAccessDenied {
        message: String,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let (status, body) = match self {
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".into(),
                    message,
                    field,
                },
            ),
            ApiError::DuplicateEmail { .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "DUPLICATE_EMAIL".into(),
                    message: "A user with this email already exists".into(),
                    field: Some("email".into()),
                },
            ),
            ApiError::InvalidCredential { .. } => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "INVALID_CREDENTIAL".into(),
                    message: "Invalid credentials".into(),
                    field: None,
                },
            ),
            ApiError::TenantAccessDenied { message, .. } => {
                let body = TenantAccessDeniedResponse {
                    success: false,
                    message,
                    error_code: "TENANT_ACCESS_DENIED",
                    timestamp: chrono::Utc::now().to_rfc3339(),
                };
                return (StatusCode::FORBIDDEN, Json(body)).into_response();
            }
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                    field: None,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        // Log the database error for debugging
        log::error!("Database error: {}", e);

        match e {
            DbError::UniqueViolation {
                entity: "users.email",
                ..
            } => ApiError::DuplicateEmail {
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ApiError::Internal {
                message: "Database operation failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Convert auth errors to API errors. Token failures of every kind
/// collapse into the uniform credential failure; only crypto faults
/// (key/hash breakage) are server errors.
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Crypto { message, .. } => ApiError::Internal {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ApiError::InvalidCredential {
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Convert UUID parse errors to API errors
impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid UUID format: {}", e),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
