/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use planpoker_api::{app::AppState, config::Config};
/// use planpoker_shared::jira::HttpJiraApi;
/// use planpoker_shared::services::PgJiraDataService;
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let jira_api = HttpJiraApi::new(config.jira.request_timeout())?;
/// let state = AppState::new(
///     Arc::new(PgJiraDataService::new(pool)),
///     Arc::new(jira_api),
///     config,
/// );
/// let app = planpoker_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::auth::{entity_user_only, jwt_auth_layer},
    routes,
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use planpoker_shared::{jira::JiraApi, services::JiraDataService};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler via axum's `State` extractor; all fields are
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Jira instance storage
    pub jira_data: Arc<dyn JiraDataService>,

    /// Outbound Jira API
    pub jira_api: Arc<dyn JiraApi>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        jira_data: Arc<dyn JiraDataService>,
        jira_api: Arc<dyn JiraApi>,
        config: Config,
    ) -> Self {
        Self {
            jira_data,
            jira_api,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token validation
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET /health                                   # public
/// └── /api/users/:user_id/jira-instances            # bearer token, same user or admin
///     ├── GET    /
///     ├── POST   /
///     ├── PUT    /:instance_id
///     ├── DELETE /:instance_id
///     └── POST   /:instance_id/jql-story-search
/// ```
///
/// Layers, outermost first: CORS, request tracing, then per-route
/// authentication. Unknown paths and unsupported methods answer with the
/// failure envelope.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route(
        "/health",
        get(routes::health::health_check).fallback(routes::fallback::method_not_allowed),
    );

    let jira_routes = Router::new()
        .route(
            "/users/:user_id/jira-instances",
            get(routes::jira::list_instances)
                .post(routes::jira::create_instance)
                .fallback(routes::fallback::method_not_allowed),
        )
        .route(
            "/users/:user_id/jira-instances/:instance_id",
            put(routes::jira::update_instance)
                .delete(routes::jira::delete_instance)
                .fallback(routes::fallback::method_not_allowed),
        )
        .route(
            "/users/:user_id/jira-instances/:instance_id/jql-story-search",
            post(routes::jira::jql_story_search).fallback(routes::fallback::method_not_allowed),
        )
        .route_layer(axum::middleware::from_fn(entity_user_only))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let cors = if state.config.cors_permissive() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", jira_routes)
        .fallback(routes::fallback::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
