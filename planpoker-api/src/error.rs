/// Error handling for the API server
///
/// All handlers return `ApiResult<T>`; `ApiError` renders into the standard
/// failure envelope (see [`crate::response`]).
///
/// | Variant | Status | Code |
/// |---|---|---|
/// | `Invalid` | 400 | `EINVALID` |
/// | `Unauthorized` | 401 | `EUNAUTHORIZED` |
/// | `Forbidden` | 403 | `EFORBIDDEN` |
/// | `InternalError` | 500 | `EINTERNAL` |
///
/// Internal errors are logged with their detail; clients only ever see a
/// generic message.
///
/// # Example
///
/// ```
/// use planpoker_api::error::{ApiError, ApiResult};
/// use planpoker_api::response::Success;
///
/// async fn handler(name: String) -> ApiResult<Success<String>> {
///     if name.is_empty() {
///         return Err(ApiError::Invalid("name is required".to_string()));
///     }
///     Ok(Success::ok(name))
/// }
/// ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use planpoker_shared::{auth::jwt::JwtError, jira, services::DataError};
use std::fmt;

use crate::response;

/// Message returned to clients for any internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error.";

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or invalid client input (400)
    Invalid(String),

    /// Missing or invalid credentials (401)
    Unauthorized(String),

    /// Authenticated but not allowed (403)
    Forbidden(String),

    /// Downstream or collaborator failure (500)
    InternalError(String),
}

impl ApiError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Invalid(_) => "EINVALID",
            ApiError::Unauthorized(_) => "EUNAUTHORIZED",
            ApiError::Forbidden(_) => "EFORBIDDEN",
            ApiError::InternalError(_) => "EINTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Invalid(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::InternalError(msg) => write!(f, "{}: {}", self.code(), msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            ApiError::InternalError(msg) => {
                tracing::error!(code = "EINTERNAL", "Internal error: {}", msg);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            ApiError::Invalid(msg) | ApiError::Unauthorized(msg) | ApiError::Forbidden(msg) => {
                tracing::debug!(status = status.as_u16(), "Request rejected: {}", msg);
                msg
            }
        };

        response::failure(status, message)
    }
}

/// Body could not be read, was not JSON, or did not match the expected shape
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

/// Path segment (e.g. a UUID) failed to parse
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

/// Field validation failures, flattened into one message
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "is invalid".to_string());
                    format!("{} {}", field, message)
                })
            })
            .collect();
        messages.sort();

        ApiError::Invalid(messages.join(", "))
    }
}

/// Every data-service failure is a 500
impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Every Jira client failure is a 500
impl From<jira::Error> for ApiError {
    fn from(err: jira::Error) -> Self {
        ApiError::InternalError(format!("Jira request failed: {}", err))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::CreateError(msg) => ApiError::InternalError(msg),
            other => ApiError::Unauthorized(format!("Invalid token: {}", other)),
        }
    }
}
