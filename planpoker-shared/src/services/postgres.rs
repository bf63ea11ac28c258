/// PostgreSQL-backed Jira data service

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::{DataError, DataResult, JiraDataService};
use crate::db::pool;
use crate::models::jira_instance::{CreateJiraInstance, JiraInstance, UpdateJiraInstance};

/// Jira data service over a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgJiraDataService {
    pool: PgPool,
}

impl PgJiraDataService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl JiraDataService for PgJiraDataService {
    async fn find_instances_by_user_id(&self, user_id: Uuid) -> DataResult<Vec<JiraInstance>> {
        let instances = JiraInstance::list_by_user(&self.pool, user_id).await?;
        debug!(user_id = %user_id, count = instances.len(), "Loaded Jira instances");
        Ok(instances)
    }

    async fn create_instance(
        &self,
        user_id: Uuid,
        host: String,
        client_mail: String,
        access_token: String,
    ) -> DataResult<JiraInstance> {
        let instance = JiraInstance::create(
            &self.pool,
            CreateJiraInstance {
                user_id,
                host,
                client_mail,
                access_token,
            },
        )
        .await?;

        info!(
            user_id = %user_id,
            instance_id = %instance.id,
            host = %instance.host,
            "Created Jira instance"
        );
        Ok(instance)
    }

    async fn update_instance(
        &self,
        instance_id: Uuid,
        host: String,
        client_mail: String,
        access_token: String,
    ) -> DataResult<JiraInstance> {
        let instance = JiraInstance::update(
            &self.pool,
            instance_id,
            UpdateJiraInstance {
                host,
                client_mail,
                access_token,
            },
        )
        .await?
        .ok_or(DataError::InstanceNotFound(instance_id))?;

        info!(instance_id = %instance_id, host = %instance.host, "Updated Jira instance");
        Ok(instance)
    }

    async fn delete_instance(&self, instance_id: Uuid) -> DataResult<()> {
        if !JiraInstance::delete(&self.pool, instance_id).await? {
            return Err(DataError::InstanceNotFound(instance_id));
        }

        info!(instance_id = %instance_id, "Deleted Jira instance");
        Ok(())
    }

    async fn get_instance_by_id(&self, instance_id: Uuid) -> DataResult<JiraInstance> {
        JiraInstance::find_by_id(&self.pool, instance_id)
            .await?
            .ok_or(DataError::InstanceNotFound(instance_id))
    }

    async fn ping(&self) -> DataResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }
}
