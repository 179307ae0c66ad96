//! Test actions - drive the service the way clients and the provider do
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use taskrelay::MessageHandler;

use super::setup::TestSetup;

impl TestSetup {
    /// Sends a joinBoard frame as if it arrived on the connection's socket
    pub async fn join(&self, connection_id: &str, board_id: &str) {
        let message = json!({"event": "joinBoard", "data": {"boardId": board_id}});
        self.input_handler
            .handle_message(connection_id, message.to_string())
            .await;
    }

    pub async fn leave(&self, connection_id: &str, board_id: &str) {
        let message = json!({"event": "leaveBoard", "data": {"boardId": board_id}});
        self.input_handler
            .handle_message(connection_id, message.to_string())
            .await;
    }

    /// Socket closed: the cleanup the connection task performs on exit
    pub async fn disconnect(&self, connection_id: &str) {
        self.relay.disconnect(connection_id).await;
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    /// Delivers a webhook body exactly as the provider would post it
    pub async fn deliver_webhook(&self, body: &str) -> StatusCode {
        let request = Request::post("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.app.clone().oneshot(request).await.unwrap().status()
    }
}
