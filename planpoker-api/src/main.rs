//! # PlanPoker API Server
//!
//! Serves the Jira integration endpoints of PlanPoker.
//!
//! ## Startup
//!
//! 1. Load configuration from the environment
//! 2. Connect to PostgreSQL and apply migrations
//! 3. Build the Axum router
//! 4. Serve until Ctrl-C, then close the pool
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p planpoker-api
//! ```

use planpoker_api::{
    app::{build_router, AppState},
    config::Config,
};
use planpoker_shared::{
    db::{
        migrations::{get_migration_status, run_migrations},
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    jira::HttpJiraApi,
    services::PgJiraDataService,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planpoker_api=debug,planpoker_shared=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "PlanPoker API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;
    let status = get_migration_status(&pool).await?;
    tracing::info!(
        applied_migrations = status.applied_migrations,
        latest_version = ?status.latest_version,
        "Database schema ready"
    );

    let jira_api = HttpJiraApi::new(config.jira.request_timeout())?;
    let bind_address = config.bind_address();

    let state = AppState::new(
        Arc::new(PgJiraDataService::new(pool.clone())),
        Arc::new(jira_api),
        config,
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, draining connections");
    close_pool(pool).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
