/// Authentication middleware
///
/// - [`jwt_auth_layer`]: validates the bearer token and inserts an
///   [`AuthContext`] into request extensions
/// - [`entity_user_only`]: requires the `:user_id` path segment to match the
///   authenticated user, unless the caller is an admin
///
/// Both are attached with `route_layer` so path parameters are available.

use crate::{app::AppState, error::ApiError, extract::ApiPath};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use planpoker_shared::auth::{jwt, AuthContext};
use std::collections::HashMap;
use uuid::Uuid;

/// Extracts and validates the JWT from the `Authorization` header
pub async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_access_token(token.trim(), state.jwt_secret())?;
    let auth = AuthContext::from_claims(&claims);

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}

/// Rejects requests for another user's resources
pub async fn entity_user_only(
    Extension(auth): Extension<AuthContext>,
    ApiPath(params): ApiPath<HashMap<String, String>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw = params
        .get("user_id")
        .ok_or_else(|| ApiError::Invalid("Missing user id".to_string()))?;
    let user_id = Uuid::parse_str(raw)
        .map_err(|e| ApiError::Invalid(format!("Invalid user id: {}", e)))?;

    if !auth.can_access_user(user_id) {
        tracing::warn!(
            caller = %auth.user_id,
            target = %user_id,
            "Rejected access to another user's resources"
        );
        return Err(ApiError::Forbidden("Not authorized to access this user".to_string()));
    }

    Ok(next.run(req).await)
}
