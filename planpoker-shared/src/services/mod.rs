/// Data services used by the HTTP layer
///
/// Handlers never touch the database directly; they go through the
/// [`JiraDataService`] trait so the storage backend can be swapped (Postgres
/// in production, in-memory in tests).
///
/// # Implementations
///
/// - [`postgres::PgJiraDataService`]: sqlx/PostgreSQL backed
/// - [`memory::MemoryJiraDataService`]: process-local, for tests and demos

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::jira_instance::JiraInstance;

pub use memory::MemoryJiraDataService;
pub use postgres::PgJiraDataService;

/// Errors returned by data services
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The referenced Jira instance does not exist
    #[error("Jira instance not found: {0}")]
    InstanceNotFound(Uuid),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Data service result type alias
pub type DataResult<T> = Result<T, DataError>;

/// Storage operations over Jira instances
#[async_trait]
pub trait JiraDataService: Send + Sync {
    /// Lists every Jira instance owned by a user
    async fn find_instances_by_user_id(&self, user_id: Uuid) -> DataResult<Vec<JiraInstance>>;

    /// Stores a new Jira instance for a user
    async fn create_instance(
        &self,
        user_id: Uuid,
        host: String,
        client_mail: String,
        access_token: String,
    ) -> DataResult<JiraInstance>;

    /// Replaces the connection details of an existing instance
    async fn update_instance(
        &self,
        instance_id: Uuid,
        host: String,
        client_mail: String,
        access_token: String,
    ) -> DataResult<JiraInstance>;

    /// Removes an instance
    async fn delete_instance(&self, instance_id: Uuid) -> DataResult<()>;

    /// Loads a single instance
    async fn get_instance_by_id(&self, instance_id: Uuid) -> DataResult<JiraInstance>;

    /// Checks that the backing store is reachable
    async fn ping(&self) -> DataResult<()>;
}
