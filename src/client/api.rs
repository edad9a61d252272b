//! REST API Client
//!
//! This module provides the authenticated HTTP client shared by every
//! service. All calls follow the same shape: attach the bearer token when
//! the session has one, check the status, surface the response body of a
//! failed call, and decode successful bodies as JSON.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::client::config::Config;
use crate::client::session::Session;
use crate::shared::document::{Document, UpdateDocumentRequest};
use crate::shared::error::ClientError;
use crate::shared::notification::Notification;
use crate::shared::page::Page;

/// Authenticated REST client for the XFDocs backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
    stream_client: Client,
    session: Arc<Session>,
}

impl ApiClient {
    /// Create a new client from a configuration and a shared session
    pub fn new(config: Config, session: Arc<Session>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        // The stream subscription stays open indefinitely, so its requests
        // go through a client without the whole-request timeout.
        let stream_client = Client::builder().build()?;
        Ok(Self {
            config,
            client,
            stream_client,
            session,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Client for the notification stream; never carries a request timeout
    pub(crate) fn stream_http(&self) -> &Client {
        &self.stream_client
    }

    /// List the current user's notifications, newest first
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, ClientError> {
        let url = self.config.api_url("/notifications");
        let response = self.authorized(self.client.get(&url)).send().await?;
        read_json(response).await
    }

    /// Fetch one page of the current user's notifications
    pub async fn notifications_page(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<Notification>, ClientError> {
        let url = self.config.api_url("/notifications/page");
        let response = self
            .authorized(self.client.get(&url))
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;
        read_json(response).await
    }

    /// Number of unread notifications for the current user
    pub async fn unread_count(&self) -> Result<u64, ClientError> {
        let url = self.config.api_url("/notifications/unread-count");
        let response = self.authorized(self.client.get(&url)).send().await?;
        read_json(response).await
    }

    /// Mark one notification as read
    pub async fn mark_notification_read(&self, id: &str) -> Result<(), ClientError> {
        let url = self.config.api_url(&format!("/notifications/{}/read", id));
        let response = self
            .authorized(self.client.patch(&url))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        read_empty(response).await
    }

    /// Fetch a document's metadata
    pub async fn get_document(&self, id: &str) -> Result<Document, ClientError> {
        let url = self.config.api_url(&format!("/documents/{}", id));
        let response = self.authorized(self.client.get(&url)).send().await?;
        read_json(response).await
    }

    /// Update a document; the response carries the document as the backend
    /// stored it, which callers must treat as authoritative
    pub async fn update_document(
        &self,
        id: &str,
        request: &UpdateDocumentRequest,
    ) -> Result<Document, ClientError> {
        let url = self.config.api_url(&format!("/documents/{}", id));
        let response = self
            .authorized(self.client.put(&url))
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }

    /// Attach the bearer token when the session has one. Requests without
    /// a token go out bare and the backend answers 401.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }
}

/// Decode a response, mapping failed statuses to `Api` errors that carry
/// the response body
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_else(|_| status.to_string());
        return Err(ClientError::api(status.as_u16(), error_text));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Check the status of a response whose body the client does not consume
pub(crate) async fn read_empty(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_else(|_| status.to_string());
        return Err(ClientError::api(status.as_u16(), error_text));
    }
    Ok(())
}
