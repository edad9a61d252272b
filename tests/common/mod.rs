//! Shared helpers for integration tests
//!
//! Builders for wire payloads, pre-wired clients pointed at a wiremock
//! backend, and small wait utilities for watch channels and request
//! counting.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use wiremock::MockServer;

use xfdocs::client::{ApiClient, Config, Session};
use xfdocs::shared::{Document, Notification};

/// Reconnect delay for tests that must not reconnect within their run
pub const NO_RECONNECT: Duration = Duration::from_secs(60);

/// Build a notification with fixed filler fields
pub fn notification(id: &str, message: &str, read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        recipient_user_id: 1,
        sender_user_id: 2,
        message: message.to_string(),
        document_id: "d1".to_string(),
        created_at: "2024-09-01T12:30:00".to_string(),
        read,
    }
}

/// Build a document owned by user 1
pub fn document(id: &str, is_public: bool, allowed_users: Vec<i64>) -> Document {
    Document {
        id: id.to_string(),
        filename: "stored.pdf".to_string(),
        original_filename: "report.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        file_size: 1024,
        uploaded_by: 1,
        uploaded_by_username: "alice".to_string(),
        upload_date: "2024-09-01T10:00:00".to_string(),
        is_public,
        allowed_users,
        description: None,
        tags: Vec::new(),
        version: Some(1),
        last_modified: None,
        download_count: 0,
    }
}

/// Mint a notification ID no other test run will produce
pub fn unique_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Render notifications as an event-stream body, prefixed with the INIT
/// event the backend always sends first
pub fn stream_body(notifications: &[Notification]) -> String {
    let mut body = String::from("event: INIT\ndata: Connected to notification stream\n\n");
    for notification in notifications {
        body.push_str(&format!(
            "event: NOTIFICATION\ndata: {}\n\n",
            serde_json::to_string(notification).expect("notification serializes")
        ));
    }
    body
}

/// Signed-in API client pointed at the mock server, with a reconnect
/// delay long enough that the stream never retries during a test
pub fn signed_in_client(server: &MockServer) -> ApiClient {
    signed_in_client_with_reconnect(server, NO_RECONNECT)
}

/// Signed-in API client with an explicit reconnect delay
pub fn signed_in_client_with_reconnect(server: &MockServer, delay: Duration) -> ApiClient {
    signed_in_client_with_config(server, Config::new().with_reconnect_delay(delay))
}

/// Signed-in API client with an explicit configuration; the base URL is
/// pointed at the mock server either way
pub fn signed_in_client_with_config(server: &MockServer, config: Config) -> ApiClient {
    let session = Arc::new(Session::in_memory());
    session
        .set_token(Some("test-token".to_string()))
        .expect("in-memory session accepts writes");
    ApiClient::new(config.with_base_url(server.uri()), session).expect("client builds")
}

/// API client with no stored credential
pub fn signed_out_client(server: &MockServer) -> ApiClient {
    let session = Arc::new(Session::in_memory());
    let config = Config::new().with_base_url(server.uri());
    ApiClient::new(config, session).expect("client builds")
}

/// Wait until a watch channel satisfies a predicate, panicking after five
/// seconds
pub async fn wait_until<T, F>(rx: &mut watch::Receiver<T>, predicate: F) -> T
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let value = rx.borrow_and_update();
                if predicate(&value) {
                    return value.clone();
                }
            }
            rx.changed().await.expect("watch channel closed");
        }
    })
    .await
    .expect("condition not met within five seconds")
}

/// Number of requests the mock server has recorded so far
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

/// Wait until the mock server has recorded at least `count` requests
pub async fn wait_for_requests(server: &MockServer, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if request_count(server).await >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("request count not reached within five seconds");
}
