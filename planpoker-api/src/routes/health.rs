/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// {
///   "success": true,
///   "error": "",
///   "data": { "status": "healthy", "version": "0.1.0", "database": "connected" },
///   "meta": {}
/// }
/// ```

use crate::{app::AppState, response::Success};
use axum::extract::State;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,
}

/// Reports service health, including data store connectivity
///
/// Always answers 200 so load balancers can tell a degraded process from a
/// dead one.
pub async fn health_check(State(state): State<AppState>) -> Success<HealthResponse> {
    let connected = match state.jira_data.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the data store");
            false
        }
    };

    Success::ok(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}
