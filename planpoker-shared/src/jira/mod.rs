//! Jira Cloud REST integration
//!
//! Client for searching a Jira instance's issues with JQL, authenticated with
//! a service account email and API token.
//!
//! - [`client::JiraClient`]: one client per configured Jira instance
//! - [`JiraApi`]: seam used by the HTTP layer; [`HttpJiraApi`] is the real
//!   implementation and shares a single connection pool across instances

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;
use std::time::Duration;

pub use client::{JiraClient, JiraConfig};
pub use error::{Error, Result};
pub use types::*;

/// Fields requested for every story search
pub const STORY_FIELDS: [&str; 5] = ["key", "summary", "priority", "issuetype", "description"];

/// Issue search operations against a configured Jira instance
#[async_trait]
pub trait JiraApi: Send + Sync {
    /// Runs a JQL search against the instance described by `config`
    async fn stories_jql_search(
        &self,
        config: JiraConfig,
        jql: &str,
        fields: &[&str],
        start_at: u32,
        max_results: u32,
    ) -> Result<StorySearchResult>;
}

/// [`JiraApi`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpJiraApi {
    http: reqwest::Client,
}

impl HttpJiraApi {
    /// Builds the shared HTTP client with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("planpoker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl JiraApi for HttpJiraApi {
    async fn stories_jql_search(
        &self,
        config: JiraConfig,
        jql: &str,
        fields: &[&str],
        start_at: u32,
        max_results: u32,
    ) -> Result<StorySearchResult> {
        JiraClient::with_http(self.http.clone(), config)?
            .stories_jql_search(jql, fields, start_at, max_results)
            .await
    }
}
