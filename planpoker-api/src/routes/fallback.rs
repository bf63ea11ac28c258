/// Enveloped replies for requests no handler matched

use crate::response;
use axum::{http::StatusCode, response::Response};

/// Unknown path
pub async fn not_found() -> Response {
    response::failure(StatusCode::NOT_FOUND, "Not found")
}

/// Known path, unsupported method
pub async fn method_not_allowed() -> Response {
    response::failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
