use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while calling the upstream provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider request timed out")]
    Timeout,

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider response could not be decoded: {0}")]
    Decode(String),

    #[error("Refusing to call provider path segment '{0}'")]
    InvalidPath(String),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Operations the proxy needs from the upstream board provider.
///
/// Responses are the provider's JSON, passed through untouched. Callers read
/// only the handful of fields they need (`id`, `idBoard`, `idList`, `pos`).
#[async_trait]
pub trait TaskProvider: Send + Sync {
    /// Boards visible to the configured member
    async fn list_boards(&self) -> Result<Value, ProviderError>;

    async fn get_board(&self, board_id: &str) -> Result<Value, ProviderError>;

    async fn get_board_lists(&self, board_id: &str) -> Result<Value, ProviderError>;

    async fn get_board_cards(&self, board_id: &str) -> Result<Value, ProviderError>;

    async fn get_list_cards(&self, list_id: &str) -> Result<Value, ProviderError>;

    async fn create_board(&self, name: &str) -> Result<Value, ProviderError>;

    async fn rename_board(&self, board_id: &str, name: &str) -> Result<Value, ProviderError>;

    /// Creates a list at the bottom of the board
    async fn create_list(&self, board_id: &str, name: &str) -> Result<Value, ProviderError>;

    async fn create_card(&self, list_id: &str, name: &str) -> Result<Value, ProviderError>;

    /// Applies an open set of field updates to a card. Values are already
    /// rendered to their query-string form.
    async fn update_card(
        &self,
        card_id: &str,
        fields: &[(String, String)],
    ) -> Result<Value, ProviderError>;

    /// Soft-deletes a card by closing it, so the provider keeps its history
    async fn archive_card(&self, card_id: &str) -> Result<Value, ProviderError> {
        self.update_card(card_id, &[("closed".to_string(), "true".to_string())])
            .await
    }
}
