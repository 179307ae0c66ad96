#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, RwLock};

use taskrelay::provider::{ProviderError, TaskProvider};
use taskrelay::websockets::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every frame the relay hands to a connection instead of writing it
/// to a socket
#[derive(Clone, Default)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, Vec<String>>>>,
    connected: Arc<RwLock<Vec<String>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_messages_for(&self, connection_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(connection_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn is_connected(&self, connection_id: &str) -> bool {
        self.connected
            .read()
            .await
            .iter()
            .any(|c| c == connection_id)
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, connection_id: String, _sender: mpsc::UnboundedSender<String>) {
        self.connected.write().await.push(connection_id);
    }

    async fn remove_connection(&self, connection_id: &str) {
        self.connected.write().await.retain(|c| c != connection_id);
    }

    async fn send_to_connection(&self, connection_id: &str, message: &str) -> bool {
        if !self.is_connected(connection_id).await {
            return false;
        }
        self.sent_messages
            .write()
            .await
            .entry(connection_id.to_string())
            .or_default()
            .push(message.to_string());
        true
    }

    async fn send_to_connections(&self, connection_ids: &[String], message: &str) -> usize {
        let mut delivered = 0;
        for connection_id in connection_ids {
            if self.send_to_connection(connection_id, message).await {
                delivered += 1;
            }
        }
        delivered
    }

    async fn connection_count(&self) -> usize {
        self.connected.read().await.len()
    }
}

/// In-memory provider holding lists and cards, with a log of mutating calls
#[derive(Default)]
pub struct FakeTrello {
    lists: Mutex<Vec<Value>>,
    cards: Mutex<Vec<Value>>,
    updates: Mutex<Vec<(String, Vec<(String, String)>)>>,
    next_id: Mutex<u32>,
}

impl FakeTrello {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(self, id: &str, board_id: &str) -> Self {
        self.lists
            .lock()
            .unwrap()
            .push(json!({"id": id, "idBoard": board_id, "name": id, "closed": false}));
        self
    }

    pub fn with_card(self, id: &str, list_id: &str, board_id: &str, pos: f64) -> Self {
        self.cards.lock().unwrap().push(json!({
            "id": id, "idList": list_id, "idBoard": board_id,
            "name": id, "pos": pos, "closed": false
        }));
        self
    }

    /// Field updates sent for a card, in call order
    pub fn updates_for(&self, card_id: &str) -> Vec<Vec<(String, String)>> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == card_id)
            .map(|(_, fields)| fields.clone())
            .collect()
    }

    pub fn card(&self, card_id: &str) -> Option<Value> {
        self.cards
            .lock()
            .unwrap()
            .iter()
            .find(|c| c["id"] == card_id)
            .cloned()
    }

    pub fn card_count(&self) -> usize {
        self.cards.lock().unwrap().len()
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("{prefix}-{next}")
    }

    fn not_found() -> ProviderError {
        ProviderError::Status {
            status: 404,
            body: "The requested resource was not found.".to_string(),
        }
    }
}

#[async_trait]
impl TaskProvider for FakeTrello {
    async fn list_boards(&self) -> Result<Value, ProviderError> {
        Ok(json!([]))
    }

    async fn get_board(&self, board_id: &str) -> Result<Value, ProviderError> {
        Ok(json!({"id": board_id, "name": board_id}))
    }

    async fn get_board_lists(&self, _board_id: &str) -> Result<Value, ProviderError> {
        Ok(Value::Array(self.lists.lock().unwrap().clone()))
    }

    async fn get_board_cards(&self, _board_id: &str) -> Result<Value, ProviderError> {
        Ok(Value::Array(self.cards.lock().unwrap().clone()))
    }

    async fn get_list_cards(&self, list_id: &str) -> Result<Value, ProviderError> {
        let cards = self.cards.lock().unwrap();
        Ok(Value::Array(
            cards
                .iter()
                .filter(|c| c["idList"] == list_id && c["closed"] != true)
                .cloned()
                .collect(),
        ))
    }

    async fn create_board(&self, name: &str) -> Result<Value, ProviderError> {
        Ok(json!({"id": self.next_id("board"), "name": name}))
    }

    async fn rename_board(&self, board_id: &str, name: &str) -> Result<Value, ProviderError> {
        Ok(json!({"id": board_id, "name": name}))
    }

    async fn create_list(&self, board_id: &str, name: &str) -> Result<Value, ProviderError> {
        let list = json!({"id": self.next_id("list"), "idBoard": board_id, "name": name});
        self.lists.lock().unwrap().push(list.clone());
        Ok(list)
    }

    async fn create_card(&self, list_id: &str, name: &str) -> Result<Value, ProviderError> {
        let board_id = self
            .lists
            .lock()
            .unwrap()
            .iter()
            .find(|l| l["id"] == list_id)
            .and_then(|l| l["idBoard"].as_str().map(str::to_string))
            .ok_or_else(Self::not_found)?;
        let card = json!({
            "id": self.next_id("card"),
            "idList": list_id,
            "idBoard": board_id,
            "name": name,
            "pos": 65536.0,
            "closed": false,
        });
        self.cards.lock().unwrap().push(card.clone());
        Ok(card)
    }

    async fn update_card(
        &self,
        card_id: &str,
        fields: &[(String, String)],
    ) -> Result<Value, ProviderError> {
        self.updates
            .lock()
            .unwrap()
            .push((card_id.to_string(), fields.to_vec()));

        let mut cards = self.cards.lock().unwrap();
        let card = cards
            .iter_mut()
            .find(|c| c["id"] == card_id)
            .ok_or_else(Self::not_found)?;
        for (key, value) in fields {
            card[key.as_str()] = match key.as_str() {
                "pos" => value.parse::<f64>().map(Value::from).unwrap_or(json!(value)),
                "closed" => Value::Bool(value == "true"),
                _ => Value::String(value.clone()),
            };
        }
        Ok(card.clone())
    }
}
