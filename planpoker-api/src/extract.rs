/// Request extractors that reject with [`ApiError`]
///
/// axum's stock `Json` and `Path` extractors answer bad input with plain-text
/// bodies and a mix of 400/415/422. These wrappers route every rejection
/// through `ApiError::Invalid` so malformed input always gets a 400 in the
/// standard envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON body extractor
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters extractor
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
