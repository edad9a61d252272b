//! Desktop Alert Hook
//!
//! Newly pushed notifications can surface as a desktop alert. Alert
//! delivery belongs to the embedding frontend, so the channel only talks
//! to this trait: it checks permission, fires, and moves on. Delivery is
//! best-effort; implementations swallow their own failures. Without a
//! sink installed, pushes update the feed silently.

/// Receiver for best-effort desktop alerts
pub trait AlertSink: Send + Sync {
    /// Whether the user has granted alert permission
    fn permission_granted(&self) -> bool;

    /// Show an alert with a title and body
    fn alert(&self, title: &str, body: &str);
}
