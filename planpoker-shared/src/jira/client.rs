//! JIRA REST client

use reqwest::{header, StatusCode, Url};
use tracing::{debug, warn};

use super::auth::JiraAuth;
use super::error::{Error, Result};
use super::types::{JiraErrorBody, SearchRequest, StorySearchResult};

const SEARCH_PATH: &str = "rest/api/2/search";

/// Connection details for one Jira instance
#[derive(Clone)]
pub struct JiraConfig {
    pub instance_host: String,
    pub client_mail: String,
    pub access_token: String,
}

impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("instance_host", &self.instance_host)
            .field("client_mail", &self.client_mail)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: Url,
    auth: JiraAuth,
}

impl JiraClient {
    /// Creates a client with its own connection pool
    pub fn new(config: JiraConfig) -> Result<Self> {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Creates a client on top of an existing `reqwest::Client`
    pub fn with_http(http: reqwest::Client, config: JiraConfig) -> Result<Self> {
        let base_url = normalize_host(&config.instance_host)?;

        Ok(Self {
            http,
            base_url,
            auth: JiraAuth::new(config.client_mail, config.access_token),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Searches issues with JQL, returning one page of stories
    ///
    /// `max_results == 0` leaves the page size to the server.
    pub async fn stories_jql_search(
        &self,
        jql: &str,
        fields: &[&str],
        start_at: u32,
        max_results: u32,
    ) -> Result<StorySearchResult> {
        let url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| Error::InvalidHost {
                host: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let body = SearchRequest {
            jql,
            fields,
            start_at,
            max_results: (max_results > 0).then_some(max_results),
        };

        debug!(host = %self.base_url, start_at, max_results, "Running JQL story search");

        let response = self
            .http
            .post(url)
            .header(header::AUTHORIZATION, self.auth.to_basic_auth())
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = api_error_message(status, &text);
            warn!(host = %self.base_url, status = status.as_u16(), %message, "Jira search failed");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let result: StorySearchResult = serde_json::from_slice(&bytes)?;
        debug!(
            host = %self.base_url,
            returned = result.stories.len(),
            total = result.total,
            "JQL story search completed"
        );
        Ok(result)
    }
}

/// Turns a user-entered host into a base URL ending in `/`
///
/// Accepts bare hostnames ("example.atlassian.net"), full URLs, and server
/// installs with a context path ("https://jira.example.com/jira/").
pub fn normalize_host(host: &str) -> Result<Url> {
    let trimmed = host.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidHost {
            host: host.to_string(),
            reason: "host is empty".to_string(),
        });
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| Error::InvalidHost {
        host: host.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidHost {
            host: host.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<JiraErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.summary())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body.chars().take(512).collect()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::{HttpJiraApi, JiraApi, STORY_FIELDS};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_normalize_bare_host() {
        let url = normalize_host("example.atlassian.net").unwrap();
        assert_eq!(url.as_str(), "https://example.atlassian.net/");
        assert_eq!(
            url.join(SEARCH_PATH).unwrap().as_str(),
            "https://example.atlassian.net/rest/api/2/search"
        );
    }

    #[test]
    fn test_normalize_trailing_slash_and_context_path() {
        assert_eq!(
            normalize_host("https://example.atlassian.net///").unwrap().as_str(),
            "https://example.atlassian.net/"
        );

        let url = normalize_host("http://jira.internal:8080/jira").unwrap();
        assert_eq!(
            url.join(SEARCH_PATH).unwrap().as_str(),
            "http://jira.internal:8080/jira/rest/api/2/search"
        );
    }

    #[test]
    fn test_normalize_rejects_bad_hosts() {
        assert!(matches!(
            normalize_host("   "),
            Err(Error::InvalidHost { .. })
        ));
        assert!(matches!(
            normalize_host("ftp://example.com"),
            Err(Error::InvalidHost { .. })
        ));
        assert!(normalize_host("https://exa mple.com").is_err());
    }

    #[test]
    fn test_client_new_validates_host() {
        let config = JiraConfig {
            instance_host: String::new(),
            client_mail: "bot@example.com".to_string(),
            access_token: "token".to_string(),
        };
        assert!(JiraClient::new(config).is_err());
    }

    #[test]
    fn test_api_error_message_prefers_jira_messages() {
        let body = r#"{"errorMessages":["The value 'NOPE' does not exist for the field 'project'."],"errors":{}}"#;
        assert_eq!(
            api_error_message(StatusCode::BAD_REQUEST, body),
            "The value 'NOPE' does not exist for the field 'project'."
        );
        assert_eq!(
            api_error_message(StatusCode::UNAUTHORIZED, ""),
            "Unauthorized"
        );
        assert_eq!(
            api_error_message(StatusCode::BAD_GATEWAY, "<html>down</html>"),
            "<html>down</html>"
        );
    }

    #[test]
    fn test_config_debug_hides_token() {
        let config = JiraConfig {
            instance_host: "example.atlassian.net".to_string(),
            client_mail: "bot@example.com".to_string(),
            access_token: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    fn mock_config(server: &MockServer) -> JiraConfig {
        JiraConfig {
            instance_host: server.uri(),
            client_mail: "u@e.com".to_string(),
            access_token: "tok".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_sends_basic_auth_and_omits_zero_page_size() {
        let server = MockServer::start().await;
        let fields = ["key", "summary", "priority", "issuetype", "description"];

        Mock::given(method("POST"))
            .and(path("/rest/api/2/search"))
            .and(header("authorization", "Basic dUBlLmNvbTp0b2s="))
            .and(header("accept", "application/json"))
            .and(body_json(json!({
                "jql": "project = P",
                "fields": fields,
                "startAt": 0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0,
                "maxResults": 50,
                "total": 1,
                "issues": [{
                    "id": "10001",
                    "key": "P-1",
                    "fields": {"summary": "Size the backlog"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(mock_config(&server)).unwrap();
        let result = client
            .stories_jql_search("project = P", &fields, 0, 0)
            .await
            .unwrap();

        assert_eq!(result.max_results, 50);
        assert_eq!(result.total, 1);
        assert_eq!(result.stories[0].key, "P-1");
        assert_eq!(result.stories[0].fields.summary, "Size the backlog");
    }

    #[tokio::test]
    async fn test_search_forwards_page_size() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/search"))
            .and(body_json(json!({
                "jql": "project = P",
                "fields": ["key"],
                "startAt": 20,
                "maxResults": 10
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 20,
                "maxResults": 10,
                "total": 20,
                "issues": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(mock_config(&server)).unwrap();
        let result = client
            .stories_jql_search("project = P", &["key"], 20, 10)
            .await
            .unwrap();

        assert_eq!(result.start_at, 20);
        assert!(result.stories.is_empty());
    }

    #[tokio::test]
    async fn test_search_maps_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errorMessages": ["Error in JQL"],
                "errors": {}
            })))
            .mount(&server)
            .await;

        let client = JiraClient::new(mock_config(&server)).unwrap();
        let err = client
            .stories_jql_search("project = ", &["key"], 0, 0)
            .await
            .unwrap_err();

        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Error in JQL");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_undecodable_body_is_json_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let client = JiraClient::new(mock_config(&server)).unwrap();
        let err = client
            .stories_jql_search("project = P", &["key"], 0, 0)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_http_jira_api_uses_instance_config() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/search"))
            .and(header("authorization", "Basic dUBlLmNvbTp0b2s="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0,
                "maxResults": 50,
                "total": 0,
                "issues": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpJiraApi::new(std::time::Duration::from_secs(5)).unwrap();
        let result = api
            .stories_jql_search(mock_config(&server), "project = P", &STORY_FIELDS, 0, 0)
            .await
            .unwrap();

        assert_eq!(result.total, 0);
    }
}
