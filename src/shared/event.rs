/**
 * Notification Stream Events
 *
 * The backend pushes named events over the notification stream. An INIT
 * event acknowledges the subscription; NOTIFICATION events carry a full
 * notification payload as JSON.
 */
use serde::{Deserialize, Serialize};

use crate::shared::notification::Notification;

/// Event name sent once when the stream is established
pub const INIT_EVENT: &str = "INIT";

/// Event name for pushed notifications
pub const NOTIFICATION_EVENT: &str = "NOTIFICATION";

/// A decoded event from the notification stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StreamEvent {
    /// Subscription acknowledged by the backend
    Init,
    /// A notification pushed to the current user
    Notification(Notification),
}

impl StreamEvent {
    /// Decode a dispatched stream event from its name and data payload
    ///
    /// Unknown event names yield `Ok(None)` so new server-side events do
    /// not break older clients. A NOTIFICATION payload that fails to parse
    /// is an error; the caller decides whether to drop or surface it.
    pub fn parse(name: &str, data: &str) -> Result<Option<Self>, serde_json::Error> {
        match name {
            INIT_EVENT => Ok(Some(Self::Init)),
            NOTIFICATION_EVENT => Ok(Some(Self::Notification(serde_json::from_str(data)?))),
            _ => Ok(None),
        }
    }

    /// Wire name of this event
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => INIT_EVENT,
            Self::Notification(_) => NOTIFICATION_EVENT,
        }
    }
}
