//! Notification Channel
//!
//! Live connection to the backend's notification stream plus the REST
//! operations on notifications. The channel owns a background task that
//! subscribes to the stream, merges pushed notifications into the feed
//! and reconnects after a fixed delay whenever the subscription drops.
//!
//! ## Features
//!
//! - **Named stream events**: INIT acknowledgement, NOTIFICATION payloads
//! - **Automatic reconnection**: fixed delay between attempts, stopped by
//!   `close` or by the credential disappearing
//! - **Observable state**: feed, unread counter and connection status are
//!   published through watch channels
//! - **Desktop alerts**: optional best-effort hook for new notifications

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::api::ApiClient;
use crate::client::notifications::alert::AlertSink;
use crate::client::notifications::feed::NotificationFeed;
use crate::client::notifications::sse::SseDecoder;
use crate::shared::error::ClientError;
use crate::shared::event::StreamEvent;
use crate::shared::notification::Notification;
use crate::shared::page::Page;

/// Connection state of the notification stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No live subscription
    Disconnected,
    /// Subscription request in flight
    Connecting,
    /// Stream established and delivering events
    Connected,
}

/// Live notification service
pub struct NotificationChannel {
    api: ApiClient,
    feed: NotificationFeed,
    status: Arc<watch::Sender<ConnectionStatus>>,
    generation: Arc<AtomicU64>,
    stream_task: Mutex<Option<JoinHandle<()>>>,
    alert: Option<Arc<dyn AlertSink>>,
}

impl NotificationChannel {
    /// Create a channel with an empty feed
    pub fn new(api: ApiClient) -> Self {
        let (status, _) = watch::channel(ConnectionStatus::Disconnected);
        Self {
            api,
            feed: NotificationFeed::new(),
            status: Arc::new(status),
            generation: Arc::new(AtomicU64::new(0)),
            stream_task: Mutex::new(None),
            alert: None,
        }
    }

    /// Install a desktop alert hook for newly pushed notifications
    pub fn with_alert_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.alert = Some(sink);
        self
    }

    /// Open the stream subscription
    ///
    /// Does nothing when no credential is stored or a subscription is
    /// already live; repeated calls never stack connections.
    pub fn connect(&self) {
        if !self.api.session().is_authenticated() {
            tracing::debug!("[Notify] connect skipped: not signed in");
            return;
        }

        let mut task = self.task_slot();
        if let Some(handle) = task.as_ref() {
            if !handle.is_finished() {
                tracing::debug!("[Notify] connect skipped: stream already live");
                return;
            }
        }

        let api = self.api.clone();
        let feed = self.feed.clone();
        let gate = StatusGate {
            status: Arc::clone(&self.status),
            generation: Arc::clone(&self.generation),
            spawned_for: self.generation.load(Ordering::SeqCst),
        };
        let alert = self.alert.clone();
        *task = Some(tokio::spawn(run_stream(api, feed, gate, alert)));
    }

    /// Close the stream subscription
    ///
    /// Cancels the background task, including a pending reconnect delay,
    /// and reports `Disconnected`. The abort only lands at the task's next
    /// await, so its status handle is revoked first; anything the task
    /// still publishes is dropped. Safe to call at any time.
    pub fn close(&self) {
        let mut task = self.task_slot();
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = task.take() {
            handle.abort();
            tracing::info!("[Notify] stream closed");
        }
        self.status.send_replace(ConnectionStatus::Disconnected);
    }

    /// Watch the connection status
    pub fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.subscribe()
    }

    /// Current connection status
    pub fn current_status(&self) -> ConnectionStatus {
        *self.status.borrow()
    }

    /// Watch the notification list
    pub fn notifications(&self) -> watch::Receiver<Vec<Notification>> {
        self.feed.notifications()
    }

    /// Watch the unread counter
    pub fn unread_count(&self) -> watch::Receiver<u64> {
        self.feed.unread()
    }

    /// The feed holding this channel's observable state
    pub fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    /// Fetch all notifications, newest first, and replace the local feed
    /// with the result
    pub async fn fetch_all(&self) -> Result<Vec<Notification>, ClientError> {
        let notifications = self.api.list_notifications().await?;
        self.feed.resync(notifications.clone());
        Ok(notifications)
    }

    /// Fetch one page of notifications without touching the feed
    pub async fn fetch_page(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<Notification>, ClientError> {
        self.api.notifications_page(page, size).await
    }

    /// Re-fetch the unread count and overwrite the local counter
    pub async fn refresh_unread_count(&self) -> Result<u64, ClientError> {
        let count = self.api.unread_count().await?;
        self.feed.set_unread(count);
        Ok(count)
    }

    /// Mark a notification as read
    ///
    /// The local read flag and counter only change once the backend has
    /// confirmed; a failed request leaves the feed untouched.
    pub async fn mark_as_read(&self, id: &str) -> Result<(), ClientError> {
        self.api.mark_notification_read(id).await?;
        self.feed.mark_read(id);
        Ok(())
    }

    fn task_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.stream_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for NotificationChannel {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.task_slot().take() {
            handle.abort();
        }
    }
}

/// Status handle held by one spawn of the stream task
///
/// `close` revokes the handle by advancing the channel's generation before
/// it aborts the task. A task caught between awaits can keep running for a
/// moment on another worker; its publishes hit the generation check and
/// drop instead of overwriting the `Disconnected` that `close` reported.
struct StatusGate {
    status: Arc<watch::Sender<ConnectionStatus>>,
    generation: Arc<AtomicU64>,
    spawned_for: u64,
}

impl StatusGate {
    fn publish(&self, next: ConnectionStatus) {
        self.status.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != self.spawned_for {
                return false;
            }
            *current = next;
            true
        });
    }
}

/// Subscribe to the notification stream, reconnecting after a fixed delay
/// until the task is aborted or the credential disappears
async fn run_stream(
    api: ApiClient,
    feed: NotificationFeed,
    gate: StatusGate,
    alert: Option<Arc<dyn AlertSink>>,
) {
    let reconnect_delay = api.config().reconnect_delay();
    let url = api.config().api_url("/notifications/stream");

    loop {
        // Re-check the credential on every attempt so a logout stops the
        // retry loop instead of hammering the backend with 401s.
        let token = match api.session().token() {
            Some(token) => token,
            None => {
                tracing::info!("[Notify] credential gone, stopping stream");
                gate.publish(ConnectionStatus::Disconnected);
                return;
            }
        };

        tracing::info!("[Notify] subscribing to {}", url);
        gate.publish(ConnectionStatus::Connecting);

        // The stream endpoint takes the token as a query parameter; the
        // browser EventSource this replaces cannot set request headers.
        // The request goes through the untimed client: a configured
        // request timeout covers REST calls, not a subscription that is
        // supposed to outlive every timeout period.
        let response = match api
            .stream_http()
            .get(&url)
            .query(&[("access_token", token.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("[Notify] stream connect failed (will retry): {}", e);
                gate.publish(ConnectionStatus::Disconnected);
                tokio::time::sleep(reconnect_delay).await;
                continue;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "[Notify] stream rejected with status {} (will retry)",
                response.status()
            );
            gate.publish(ConnectionStatus::Disconnected);
            tokio::time::sleep(reconnect_delay).await;
            continue;
        }

        tracing::info!("[Notify] stream connected");
        gate.publish(ConnectionStatus::Connected);

        let mut decoder = SseDecoder::new();
        let mut stream = response.bytes_stream();

        loop {
            match stream.next().await {
                Some(Ok(chunk)) => {
                    for frame in decoder.feed(&chunk) {
                        handle_frame(&frame.event, &frame.data, &feed, alert.as_deref());
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!("[Notify] stream error (will retry): {}", e);
                    break;
                }
                None => {
                    tracing::warn!("[Notify] stream ended (will retry)");
                    break;
                }
            }
        }

        // Server-side closes and transport errors take the same retry
        // path, matching EventSource semantics.
        gate.publish(ConnectionStatus::Disconnected);
        tokio::time::sleep(reconnect_delay).await;
    }
}

/// Apply one decoded stream event to the feed
fn handle_frame(event: &str, data: &str, feed: &NotificationFeed, alert: Option<&dyn AlertSink>) {
    match StreamEvent::parse(event, data) {
        Ok(Some(StreamEvent::Init)) => {
            tracing::debug!("[Notify] stream acknowledged: {}", data);
        }
        Ok(Some(StreamEvent::Notification(notification))) => {
            let message = notification.message.clone();
            if feed.push(notification) {
                if let Some(sink) = alert {
                    if sink.permission_granted() {
                        sink.alert("New notification", &message);
                    }
                }
            } else {
                tracing::debug!("[Notify] duplicate notification dropped");
            }
        }
        Ok(None) => {
            tracing::debug!("[Notify] ignoring unknown stream event '{}'", event);
        }
        Err(e) => {
            tracing::warn!("[Notify] dropping malformed stream payload: {}", e);
        }
    }
}
