//! Notification Feed State
//!
//! Owns the observable state of the notification channel: the ordered
//! notification list and the unread counter. Both are published through
//! watch channels, so any number of observers see the latest value plus
//! every subsequent change.
//!
//! # Invariants
//!
//! - The list never contains two notifications with the same ID
//! - New notifications land at the front (newest first)
//! - The unread counter never goes below zero
//! - Mutations apply as whole steps: the list and the counter only ever
//!   settle on pairs some serial order of mutations produces

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::shared::notification::Notification;

#[derive(Debug)]
struct FeedState {
    notifications: watch::Sender<Vec<Notification>>,
    unread: watch::Sender<u64>,
    /// Serializes mutations. Every mutation touches both watches, and the
    /// stream task races REST refreshes, so the pair must advance under
    /// one lock or a resync can land between a push's list and counter
    /// writes.
    write: Mutex<()>,
}

/// Observable notification list and unread counter
///
/// Cloning a feed is cheap; clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    state: Arc<FeedState>,
}

impl NotificationFeed {
    /// Create an empty feed
    pub fn new() -> Self {
        let (notifications, _) = watch::channel(Vec::new());
        let (unread, _) = watch::channel(0);
        Self {
            state: Arc::new(FeedState {
                notifications,
                unread,
                write: Mutex::new(()),
            }),
        }
    }

    /// Watch the notification list
    pub fn notifications(&self) -> watch::Receiver<Vec<Notification>> {
        self.state.notifications.subscribe()
    }

    /// Watch the unread counter
    pub fn unread(&self) -> watch::Receiver<u64> {
        self.state.unread.subscribe()
    }

    /// Snapshot of the current notification list
    pub fn current(&self) -> Vec<Notification> {
        self.state.notifications.borrow().clone()
    }

    /// Current unread count
    pub fn unread_count(&self) -> u64 {
        *self.state.unread.borrow()
    }

    /// Merge a pushed notification into the feed
    ///
    /// New notifications are prepended and bump the unread counter. A
    /// notification whose ID is already present is dropped, which keeps
    /// reconnect replays from inflating the feed. Returns whether the
    /// notification was new.
    pub fn push(&self, notification: Notification) -> bool {
        let _write = self.write_lock();
        let inserted = self.state.notifications.send_if_modified(|list| {
            if list.iter().any(|existing| existing.id == notification.id) {
                return false;
            }
            list.insert(0, notification);
            true
        });

        if inserted {
            self.state.unread.send_modify(|count| *count += 1);
        }
        inserted
    }

    /// Apply a confirmed mark-as-read to the local state
    ///
    /// Flips the notification's read flag and decrements the unread
    /// counter, unless the notification was already read locally. An ID
    /// the feed does not contain still decrements: the backend confirmed
    /// one of the user's notifications was read, the feed just never saw
    /// that one.
    pub fn mark_read(&self, id: &str) {
        let _write = self.write_lock();
        let mut found = false;
        let mut flipped = false;
        self.state
            .notifications
            .send_if_modified(|list| match list.iter_mut().find(|n| n.id == id) {
                Some(notification) => {
                    found = true;
                    if notification.read {
                        false
                    } else {
                        notification.read = true;
                        flipped = true;
                        true
                    }
                }
                None => false,
            });

        if flipped || !found {
            self.decrement_unread();
        }
    }

    /// Replace the whole feed with a server snapshot
    ///
    /// The unread counter is recomputed from the snapshot's read flags.
    pub fn resync(&self, notifications: Vec<Notification>) {
        let _write = self.write_lock();
        let unread = notifications.iter().filter(|n| !n.read).count() as u64;
        self.state.notifications.send_replace(notifications);
        self.state.unread.send_replace(unread);
    }

    /// Overwrite the unread counter with a server-reported value
    pub fn set_unread(&self, count: u64) {
        let _write = self.write_lock();
        self.state.unread.send_replace(count);
    }

    // Caller holds the write lock.
    fn decrement_unread(&self) {
        self.state.unread.send_if_modified(|count| {
            if *count > 0 {
                *count -= 1;
                true
            } else {
                false
            }
        });
    }

    fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.state
            .write
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new()
    }
}
