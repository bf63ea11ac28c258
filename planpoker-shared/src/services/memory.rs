/// In-memory Jira data service
///
/// Keeps instances in a `RwLock<HashMap>`. Useful for exercising the HTTP
/// layer without a database. Ordering of `find_instances_by_user_id` follows
/// creation time, matching the Postgres implementation.
///
/// # Example
///
/// ```
/// use planpoker_shared::services::{JiraDataService, MemoryJiraDataService};
/// use uuid::Uuid;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = MemoryJiraDataService::new();
/// let user_id = Uuid::new_v4();
///
/// service
///     .create_instance(
///         user_id,
///         "https://example.atlassian.net".to_string(),
///         "bot@example.com".to_string(),
///         "token".to_string(),
///     )
///     .await?;
///
/// assert_eq!(service.find_instances_by_user_id(user_id).await?.len(), 1);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DataError, DataResult, JiraDataService};
use crate::models::jira_instance::JiraInstance;

#[derive(Debug, Default)]
pub struct MemoryJiraDataService {
    instances: RwLock<HashMap<Uuid, JiraInstance>>,
}

impl MemoryJiraDataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored instances across all users
    pub async fn len(&self) -> usize {
        self.instances.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.instances.read().await.is_empty()
    }
}

#[async_trait]
impl JiraDataService for MemoryJiraDataService {
    async fn find_instances_by_user_id(&self, user_id: Uuid) -> DataResult<Vec<JiraInstance>> {
        let instances = self.instances.read().await;
        let mut owned: Vec<JiraInstance> = instances
            .values()
            .filter(|instance| instance.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|instance| instance.created_date);
        Ok(owned)
    }

    async fn create_instance(
        &self,
        user_id: Uuid,
        host: String,
        client_mail: String,
        access_token: String,
    ) -> DataResult<JiraInstance> {
        let now = Utc::now();
        let instance = JiraInstance {
            id: Uuid::new_v4(),
            user_id,
            host,
            client_mail,
            access_token,
            created_date: now,
            updated_date: now,
        };

        self.instances
            .write()
            .await
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn update_instance(
        &self,
        instance_id: Uuid,
        host: String,
        client_mail: String,
        access_token: String,
    ) -> DataResult<JiraInstance> {
        let mut instances = self.instances.write().await;
        let instance = instances
            .get_mut(&instance_id)
            .ok_or(DataError::InstanceNotFound(instance_id))?;

        instance.host = host;
        instance.client_mail = client_mail;
        instance.access_token = access_token;
        instance.updated_date = Utc::now();
        Ok(instance.clone())
    }

    async fn delete_instance(&self, instance_id: Uuid) -> DataResult<()> {
        self.instances
            .write()
            .await
            .remove(&instance_id)
            .map(|_| ())
            .ok_or(DataError::InstanceNotFound(instance_id))
    }

    async fn get_instance_by_id(&self, instance_id: Uuid) -> DataResult<JiraInstance> {
        self.instances
            .read()
            .await
            .get(&instance_id)
            .cloned()
            .ok_or(DataError::InstanceNotFound(instance_id))
    }

    async fn ping(&self) -> DataResult<()> {
        Ok(())
    }
}
