//! Common test utilities for integration tests
//!
//! Builds the real router on top of an in-memory data service and a fake
//! Jira API, so the full HTTP stack (auth, extraction, validation, envelope)
//! runs without a database or network.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use planpoker_api::app::{build_router, AppState};
use planpoker_api::config::{ApiConfig, Config, DatabaseConfig, JiraApiConfig, JwtConfig};
use planpoker_shared::auth::jwt::{create_token, Claims, TokenType};
use planpoker_shared::auth::UserRole;
use planpoker_shared::jira::{self, JiraApi, JiraConfig, Story, StoryFields, StorySearchResult};
use planpoker_shared::models::jira_instance::JiraInstance;
use planpoker_shared::services::{DataError, DataResult, JiraDataService, MemoryJiraDataService};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// A Jira search as seen by the fake
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    pub host: String,
    pub client_mail: String,
    pub access_token: String,
    pub jql: String,
    pub fields: Vec<String>,
    pub start_at: u32,
    pub max_results: u32,
}

/// Jira API double that records calls and replays a canned result
pub struct FakeJiraApi {
    calls: Mutex<Vec<RecordedSearch>>,
    result: Option<StorySearchResult>,
}

impl FakeJiraApi {
    pub fn returning(result: StorySearchResult) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result: Some(result),
        }
    }

    /// Every search fails with a Jira 401
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result: None,
        }
    }

    pub fn calls(&self) -> Vec<RecordedSearch> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JiraApi for FakeJiraApi {
    async fn stories_jql_search(
        &self,
        config: JiraConfig,
        jql: &str,
        fields: &[&str],
        start_at: u32,
        max_results: u32,
    ) -> jira::Result<StorySearchResult> {
        self.calls.lock().unwrap().push(RecordedSearch {
            host: config.instance_host,
            client_mail: config.client_mail,
            access_token: config.access_token,
            jql: jql.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            start_at,
            max_results,
        });

        self.result.clone().ok_or(jira::Error::Api {
            status: 401,
            message: "Client must be authenticated to access this resource.".to_string(),
        })
    }
}

/// Data service whose every call fails like an unreachable database
pub struct UnavailableDataService;

#[async_trait]
impl JiraDataService for UnavailableDataService {
    async fn find_instances_by_user_id(&self, _user_id: Uuid) -> DataResult<Vec<JiraInstance>> {
        Err(DataError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create_instance(
        &self,
        _user_id: Uuid,
        _host: String,
        _client_mail: String,
        _access_token: String,
    ) -> DataResult<JiraInstance> {
        Err(DataError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update_instance(
        &self,
        _instance_id: Uuid,
        _host: String,
        _client_mail: String,
        _access_token: String,
    ) -> DataResult<JiraInstance> {
        Err(DataError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete_instance(&self, _instance_id: Uuid) -> DataResult<()> {
        Err(DataError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get_instance_by_id(&self, _instance_id: Uuid) -> DataResult<JiraInstance> {
        Err(DataError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> DataResult<()> {
        Err(DataError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// One story page used by search tests
pub fn sample_search_result() -> StorySearchResult {
    StorySearchResult {
        start_at: 10,
        max_results: 5,
        total: 42,
        stories: vec![Story {
            id: "10001".to_string(),
            key: "POKER-1".to_string(),
            self_url: None,
            fields: StoryFields {
                summary: "Estimate the login page".to_string(),
                description: Some(Value::String("As a user I want to log in".to_string())),
                priority: None,
                issuetype: None,
            },
        }],
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
        },
        jira: JiraApiConfig {
            request_timeout_secs: 5,
        },
    }
}

/// Test context containing the router and its collaborators
pub struct TestContext {
    pub app: axum::Router,
    pub data: Arc<dyn JiraDataService>,
    pub jira: Arc<FakeJiraApi>,
    pub user_id: Uuid,
}

impl TestContext {
    /// In-memory storage and a Jira fake returning [`sample_search_result`]
    pub fn new() -> Self {
        Self::with_services(
            Arc::new(MemoryJiraDataService::new()),
            Arc::new(FakeJiraApi::returning(sample_search_result())),
        )
    }

    pub fn with_services(data: Arc<dyn JiraDataService>, jira: Arc<FakeJiraApi>) -> Self {
        let state = AppState::new(data.clone(), jira.clone(), test_config());

        Self {
            app: build_router(state),
            data,
            jira,
            user_id: Uuid::new_v4(),
        }
    }

    /// Access token for an arbitrary user
    pub fn token_for(&self, user_id: Uuid, role: UserRole) -> String {
        let claims = Claims::new(user_id, role, TokenType::Access);
        create_token(&claims, JWT_SECRET).unwrap()
    }

    /// Access token for the context's own user
    pub fn token(&self) -> String {
        self.token_for(self.user_id, UserRole::Registered)
    }

    pub fn instances_uri(&self) -> String {
        format!("/api/users/{}/jira-instances", self.user_id)
    }

    pub fn instance_uri(&self, instance_id: Uuid) -> String {
        format!("/api/users/{}/jira-instances/{}", self.user_id, instance_id)
    }

    pub fn search_uri(&self, instance_id: Uuid) -> String {
        format!("{}/jql-story-search", self.instance_uri(instance_id))
    }

    /// Stores an instance for the context's user directly through the data service
    pub async fn seed_instance(&self, host: &str) -> JiraInstance {
        self.data
            .create_instance(
                self.user_id,
                host.to_string(),
                "bot@example.com".to_string(),
                "seed-token".to_string(),
            )
            .await
            .unwrap()
    }

    /// Sends a request with a raw body and returns status and parsed JSON body
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: Body,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                panic!(
                    "response body is not JSON ({}): {}",
                    e,
                    String::from_utf8_lossy(&bytes)
                )
            })
        };

        (status, json)
    }

    /// Sends an authenticated request as the context's user
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.token();
        match body {
            Some(body) => {
                self.send_raw(
                    method,
                    uri,
                    Some(&token),
                    Some("application/json"),
                    Body::from(body.to_string()),
                )
                .await
            }
            None => self.send_raw(method, uri, Some(&token), None, Body::empty()).await,
        }
    }
}
