use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use super::client::{ProviderError, TaskProvider};

pub const DEFAULT_TRELLO_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the Trello REST API
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub key: String,
    pub token: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("key", &"<redacted>")
            .field("token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Trello REST client. Credentials travel as `key`/`token` query parameters
/// on every request.
pub struct TrelloClient {
    http: reqwest::Client,
    base_url: Url,
    key: String,
    token: String,
}

impl TrelloClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ProviderError::ClientBuild(format!("invalid base url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::ClientBuild(
                "base url cannot carry a path".to_string(),
            ));
        }

        Ok(Self {
            http,
            base_url,
            key: config.key.clone(),
            token: config.token.clone(),
        })
    }

    /// Resolves path segments under the base url. Each segment is
    /// percent-encoded on its own, so an id can never add or climb segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ProviderError::InvalidPath(bad.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidPath(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn call(
        &self,
        method: Method,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Value, ProviderError> {
        let url = self.endpoint(segments)?;
        debug!(%method, path = %url.path(), "Calling provider");

        let response = self
            .http
            .request(method, url)
            .query(&[("key", self.key.as_str()), ("token", self.token.as_str())])
            .query(params)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let text = response.text().await.map_err(request_error)?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

fn request_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        // without_url keeps the credentials in the query string out of logs
        ProviderError::Request(e.without_url().to_string())
    }
}

#[async_trait]
impl TaskProvider for TrelloClient {
    #[instrument(skip(self))]
    async fn list_boards(&self) -> Result<Value, ProviderError> {
        self.call(Method::GET, &["members", "me", "boards"], &[]).await
    }

    #[instrument(skip(self))]
    async fn get_board(&self, board_id: &str) -> Result<Value, ProviderError> {
        self.call(Method::GET, &["boards", board_id], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn get_board_lists(&self, board_id: &str) -> Result<Value, ProviderError> {
        self.call(Method::GET, &["boards", board_id, "lists"], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn get_board_cards(&self, board_id: &str) -> Result<Value, ProviderError> {
        self.call(Method::GET, &["boards", board_id, "cards"], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn get_list_cards(&self, list_id: &str) -> Result<Value, ProviderError> {
        self.call(Method::GET, &["lists", list_id, "cards"], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn create_board(&self, name: &str) -> Result<Value, ProviderError> {
        self.call(Method::POST, &["boards"], &[("name", name)]).await
    }

    #[instrument(skip(self))]
    async fn rename_board(&self, board_id: &str, name: &str) -> Result<Value, ProviderError> {
        self.call(Method::PUT, &["boards", board_id], &[("name", name)])
            .await
    }

    #[instrument(skip(self))]
    async fn create_list(&self, board_id: &str, name: &str) -> Result<Value, ProviderError> {
        self.call(
            Method::POST,
            &["lists"],
            &[("name", name), ("idBoard", board_id), ("pos", "bottom")],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn create_card(&self, list_id: &str, name: &str) -> Result<Value, ProviderError> {
        self.call(Method::POST, &["cards"], &[("idList", list_id), ("name", name)])
            .await
    }

    #[instrument(skip(self, fields))]
    async fn update_card(
        &self,
        card_id: &str,
        fields: &[(String, String)],
    ) -> Result<Value, ProviderError> {
        let params: Vec<(&str, &str)> = fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.call(Method::PUT, &["cards", card_id], &params)
            .await
    }
}
