//! Notifications Module
//!
//! Everything behind the live notification feed: the stream subscription
//! and its reconnect loop, the wire decoder, the observable feed state and
//! the desktop alert hook.
//!
//! # Overview
//!
//! `NotificationChannel` is the entry point. It owns a `NotificationFeed`
//! for the observable list and unread counter, drives an `SseDecoder` over
//! the response body of the stream endpoint, and forwards new
//! notifications to an optional `AlertSink`.

/// Desktop alert hook
pub mod alert;

/// Stream subscription and notification operations
pub mod channel;

/// Observable feed state
pub mod feed;

/// Event stream wire decoder
pub mod sse;

pub use alert::AlertSink;
pub use channel::{ConnectionStatus, NotificationChannel};
pub use feed::NotificationFeed;
pub use sse::{SseDecoder, SseFrame};
