//! Jira authentication

/// Basic auth credentials for Jira Cloud (account email + API token)
pub struct JiraAuth {
    client_mail: String,
    access_token: String,
}

impl JiraAuth {
    pub fn new(client_mail: String, access_token: String) -> Self {
        Self {
            client_mail,
            access_token,
        }
    }

    pub fn to_basic_auth(&self) -> String {
        use base64::Engine;
        let credentials = format!("{}:{}", self.client_mail, self.access_token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

impl std::fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraAuth")
            .field("client_mail", &self.client_mail)
            .finish_non_exhaustive()
    }
}
