//! Shared Module
//!
//! This module contains the wire types exchanged with the XFDocs backend.
//! They mirror the backend's JSON contract (camelCase field names) and are
//! used by the client services for requests, responses and stream payloads.
//!
//! # Overview
//!
//! All types here are plain serializable data. Behavior lives in the
//! `client` module; these structures only describe what travels over HTTP.

/// Notification payloads
pub mod notification;

/// Document metadata and access policy types
pub mod document;

/// Users, credentials and auth payloads
pub mod user;

/// Spring-style page envelope
pub mod page;

/// Notification stream events
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use document::{AccessMode, AccessPolicy, Document, UpdateDocumentRequest};
pub use error::ClientError;
pub use event::StreamEvent;
pub use notification::Notification;
pub use page::Page;
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User};
