/// Jira instance model and database operations
///
/// A Jira instance is a stored credential bundle (host, service account email
/// and API token) that lets the application query a Jira deployment on behalf
/// of the owning user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE jira_instances (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL,
///     host VARCHAR(512) NOT NULL,
///     client_mail VARCHAR(320) NOT NULL,
///     access_token TEXT NOT NULL,
///     created_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use planpoker_shared::models::jira_instance::{CreateJiraInstance, JiraInstance};
/// use planpoker_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let instance = JiraInstance::create(&pool, CreateJiraInstance {
///     user_id: Uuid::new_v4(),
///     host: "https://example.atlassian.net".to_string(),
///     client_mail: "bot@example.com".to_string(),
///     access_token: "api-token".to_string(),
/// }).await?;
///
/// let mine = JiraInstance::list_by_user(&pool, instance.user_id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Stored Jira instance credentials
#[derive(Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JiraInstance {
    /// Unique instance ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Jira base URL (e.g. "https://example.atlassian.net")
    pub host: String,

    /// Service account email used for basic auth
    pub client_mail: String,

    /// Jira API token used as the basic auth password
    pub access_token: String,

    /// When the record was created
    pub created_date: DateTime<Utc>,

    /// When the record was last updated
    pub updated_date: DateTime<Utc>,
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for JiraInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraInstance")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("host", &self.host)
            .field("client_mail", &self.client_mail)
            .field("access_token", &"<redacted>")
            .field("created_date", &self.created_date)
            .field("updated_date", &self.updated_date)
            .finish()
    }
}

/// Input for creating a Jira instance
#[derive(Debug, Clone)]
pub struct CreateJiraInstance {
    pub user_id: Uuid,
    pub host: String,
    pub client_mail: String,
    pub access_token: String,
}

/// Input for replacing a Jira instance's connection details
#[derive(Debug, Clone)]
pub struct UpdateJiraInstance {
    pub host: String,
    pub client_mail: String,
    pub access_token: String,
}

impl JiraInstance {
    /// Creates a new Jira instance for a user
    pub async fn create(pool: &PgPool, data: CreateJiraInstance) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, JiraInstance>(
            r#"
            INSERT INTO jira_instances (user_id, host, client_mail, access_token)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, host, client_mail, access_token, created_date, updated_date
            "#,
        )
        .bind(data.user_id)
        .bind(data.host)
        .bind(data.client_mail)
        .bind(data.access_token)
        .fetch_one(pool)
        .await
    }

    /// Finds a Jira instance by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, JiraInstance>(
            r#"
            SELECT id, user_id, host, client_mail, access_token, created_date, updated_date
            FROM jira_instances
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a user's Jira instances, oldest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, JiraInstance>(
            r#"
            SELECT id, user_id, host, client_mail, access_token, created_date, updated_date
            FROM jira_instances
            WHERE user_id = $1
            ORDER BY created_date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Replaces host, email and token of an instance
    ///
    /// Returns `None` when no instance has the given ID.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateJiraInstance,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, JiraInstance>(
            r#"
            UPDATE jira_instances
            SET host = $2, client_mail = $3, access_token = $4, updated_date = NOW()
            WHERE id = $1
            RETURNING id, user_id, host, client_mail, access_token, created_date, updated_date
            "#,
        )
        .bind(id)
        .bind(data.host)
        .bind(data.client_mail)
        .bind(data.access_token)
        .fetch_optional(pool)
        .await
    }

    /// Deletes an instance, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jira_instances WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
