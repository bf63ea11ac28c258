//! Jira API types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /rest/api/2/search`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub jql: &'a str,
    pub fields: &'a [&'a str],
    pub start_at: u32,
    /// Omitted when zero so Jira applies its default page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

/// One page of JQL search results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySearchResult {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "issues", default)]
    pub stories: Vec<Story>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(default)]
    pub fields: StoryFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryFields {
    #[serde(default)]
    pub summary: String,
    /// Plain text on API v2, Atlassian Document Format on v3
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub issuetype: Option<IssueType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// Error payload returned by Jira on 4xx/5xx
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraErrorBody {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl JiraErrorBody {
    /// Joins all messages into one line, `None` when Jira sent nothing useful
    pub fn summary(&self) -> Option<String> {
        let messages: Vec<String> = self
            .error_messages
            .iter()
            .cloned()
            .chain(
                self.errors
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message)),
            )
            .collect();

        if messages.is_empty() {
            None
        } else {
            Some(messages.join("; "))
        }
    }
}
