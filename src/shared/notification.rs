//! Notification Data Structure
//!
//! Represents a single user notification, both as delivered over the
//! notification stream and as returned by the notification REST endpoints.

use serde::{Deserialize, Serialize};

/// A notification addressed to one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification ID
    pub id: String,
    /// The user this notification is addressed to
    pub recipient_user_id: i64,
    /// The user whose action produced it
    pub sender_user_id: i64,
    /// Human-readable message
    pub message: String,
    /// The document the notification refers to; may be empty
    pub document_id: String,
    /// Creation timestamp as emitted by the backend
    pub created_at: String,
    /// Whether the recipient has read it
    pub read: bool,
}
