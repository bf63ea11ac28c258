/// Middleware for the API server
///
/// - `auth`: bearer token validation and per-user access guard

pub mod auth;
