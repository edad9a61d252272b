//! Shared Error Types
//!
//! This module defines the error type surfaced by every client operation.
//! Transport, backend and local failures are kept as distinct variants so
//! callers can react differently to each (retry, re-authenticate, report).
//!
//! # Error Categories
//!
//! - `Network` - the request never completed (DNS, connect, TLS, timeout)
//! - `Api` - the backend answered with a non-success status
//! - `Decode` - the response body did not match the expected shape
//! - `Session` - the local session store could not be read or written
//! - `NoDocument` - an access policy operation ran before a document load
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.
use thiserror::Error;

/// Errors returned by the XFDocs client services
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be delivered or the response not read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend rejected the request with a non-success status
    #[error("Request failed: {status} - {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body, or the status line when the body was unreadable
        message: String,
    },

    /// The response body could not be parsed into the expected type
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The persistent session store failed
    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),

    /// An access policy operation was attempted with no document loaded
    #[error("No document loaded")]
    NoDocument,
}

impl ClientError {
    /// Create a new API error from a status code and response body
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code for `Api` errors, `None` for every other variant
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
