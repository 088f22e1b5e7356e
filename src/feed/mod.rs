//! Live feed layer — events, config, connection state.
//!
//! The transport is `tokio-tungstenite`; [`client::FeedClient`] owns the
//! connection in a background tokio task and delivers [`FeedEvent`]s to the
//! consumer as a stream. This module defines the shared event/config types.

pub mod client;

use crate::network::DEFAULT_FEED_URL;
use crate::wire::MemStatsUpdate;

pub use client::FeedClient;

/// Events emitted by the feed client to the consumer.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Connection established.
    Connected,
    /// A parsed memory-stats sample.
    Sample(MemStatsUpdate),
    /// Connection lost, or never established. The feed does not reconnect;
    /// this is the terminal event of every connection attempt.
    Disconnected { code: Option<u16>, reason: String },
    /// A deserialization or protocol error. The connection stays up and
    /// later samples are still delivered.
    Error(String),
}

/// Connection state of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Closed = 2,
}

impl From<u16> for ReadyState {
    fn from(v: u16) -> Self {
        match v {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            _ => ReadyState::Closed,
        }
    }
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,
}

impl FeedConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            connect_timeout_ms: 30_000,
        }
    }
}

impl From<&crate::network::Location> for FeedConfig {
    fn from(loc: &crate::network::Location) -> Self {
        Self::new(loc.feed_url())
    }
}
