//! Client Module
//!
//! Client-side services for the XFDocs backend: configuration, session
//! persistence, the authenticated REST client, authentication, the live
//! notification channel and the document access controller.
//!
//! # Overview
//!
//! Services share two pieces of plumbing. The `Config` carries connection
//! settings, and the `Session` holds the bearer token and cached user
//! profile behind an `Arc` so every service observes sign-ins and
//! sign-outs immediately. An `ApiClient` bundles both with a reqwest
//! client and is cheap to clone into whatever service needs it.

/// Document access policy editing
pub mod access;

/// Authenticated REST client
pub mod api;

/// Login, registration and logout
pub mod auth;

/// Connection settings
pub mod config;

/// Live notification feed
pub mod notifications;

/// Credential and profile persistence
pub mod session;

/// Re-export commonly used types for convenience
pub use access::AccessController;
pub use api::ApiClient;
pub use auth::AuthClient;
pub use config::Config;
pub use notifications::{
    AlertSink, ConnectionStatus, NotificationChannel, NotificationFeed, SseDecoder, SseFrame,
};
pub use session::Session;
