//! XFDocs Client Core
//!
//! XFDocs is the client core of a document management platform. It keeps a
//! desktop or embedded frontend in sync with the XFDocs backend: a live
//! notification feed pushed over Server-Sent Events, the REST calls backing
//! it, and staged editing of per-document access policies.
//!
//! # Overview
//!
//! This library provides the non-visual half of the client:
//! - Real-time notification stream with automatic reconnection
//! - Ordered, de-duplicated notification feed and unread counter
//! - Document access policy editing with commit-on-success semantics
//! - Authentication and persistent sessions
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Wire types mirrored from the backend API
//!   - Notification, document, user and paging structures
//!   - Stream event types
//!   - Error types
//!
//! - **`client`** - Client-side services
//!   - REST API client with bearer authentication
//!   - Notification channel (SSE subscription, feed state, unread counter)
//!   - Access controller for staged document permission edits
//!   - Configuration and session persistence
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xfdocs::client::{ApiClient, Config, NotificationChannel, Session};
//!
//! # async fn example() -> Result<(), xfdocs::shared::ClientError> {
//! let session = Arc::new(Session::load_or_default());
//! let api = ApiClient::new(Config::new(), session)?;
//!
//! let channel = NotificationChannel::new(api);
//! channel.connect();
//!
//! let mut unread = channel.unread_count();
//! unread.changed().await.ok();
//! println!("unread: {}", *unread.borrow());
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All observable state is published through `tokio::sync::watch` channels,
//! so any number of tasks can observe the latest feed, unread counter or
//! connection status without locking the services themselves.

/// Wire types mirrored from the backend API
pub mod shared;

/// Client-side services (REST, notification stream, access control)
pub mod client;

pub use client::{
    AccessController, AlertSink, ApiClient, AuthClient, Config, ConnectionStatus,
    NotificationChannel, NotificationFeed, Session,
};
pub use shared::{
    AccessMode, AccessPolicy, AuthResponse, ClientError, Document, LoginRequest, Notification,
    Page, RegisterRequest, StreamEvent, UpdateDocumentRequest, User,
};
