/// Standard JSON response envelope
///
/// Every endpoint answers with the same shape so the front end can handle
/// responses uniformly:
///
/// ```json
/// { "success": true, "error": "", "data": { ... }, "meta": { ... } }
/// ```
///
/// `data` and `meta` default to `{}` when a handler has nothing to return.
/// Failures set `success` to `false` and carry the message in `error`.
///
/// # Example
///
/// ```
/// use planpoker_api::response::Success;
/// use serde_json::json;
///
/// async fn handler() -> Success<serde_json::Value> {
///     Success::ok(json!({ "id": 1 }))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Serializes as `{}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyObject {}

/// Wire format shared by success and failure responses
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T = EmptyObject, M = EmptyObject> {
    pub success: bool,
    pub error: String,
    pub data: T,
    pub meta: M,
}

/// Successful response carrying `data` and optional `meta`
#[derive(Debug)]
pub struct Success<T, M = EmptyObject> {
    status: StatusCode,
    data: T,
    meta: M,
}

impl<T> Success<T> {
    /// `200 OK` with the given data and empty meta
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }

    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status,
            data,
            meta: EmptyObject::default(),
        }
    }
}

impl Success<EmptyObject> {
    /// `200 OK` with `data: {}`
    pub fn empty() -> Self {
        Self::ok(EmptyObject::default())
    }
}

impl<T, M> Success<T, M> {
    pub fn with_meta<N>(self, meta: N) -> Success<T, N> {
        Success {
            status: self.status,
            data: self.data,
            meta,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize, M: Serialize> IntoResponse for Success<T, M> {
    fn into_response(self) -> Response {
        let body = Envelope {
            success: true,
            error: String::new(),
            data: self.data,
            meta: self.meta,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Builds a failure envelope with the given status and message
pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let body: Envelope = Envelope {
        success: false,
        error: message.into(),
        data: EmptyObject::default(),
        meta: EmptyObject::default(),
    };

    (status, Json(body)).into_response()
}
