//! # epochcharts-client
//!
//! A Rust client for the epochcharts runtime debug endpoint. A process
//! instrumented with epochcharts exposes `/debug/charts/data-feed`
//! (a WebSocket pushing one JSON memory-stats sample per second) and
//! `/debug/charts/data` (the full exported history over HTTP). This crate
//! connects to the feed, turns each sample into a chart point, and forwards
//! it to a pluggable [`chart::ChartSink`].
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Chart** — points, series, the sink seam, and the synthetic seed
//!    history shown before the first live sample lands
//! 2. **Wire** — serde types for the backend's PascalCase JSON
//! 3. **Feed** — the WebSocket client (`tokio-tungstenite`), event stream
//! 4. **HTTP** — one-shot fetch of the exported history
//! 5. **Session** — `ChartSession`, the owning controller that wires the
//!    seed, feed, and sink together
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use epochcharts_client::prelude::*;
//!
//! let mut session = ChartSessionBuilder::new("http://localhost:8088")?
//!     .build(ChartState::new());
//!
//! session.run().await?;
//! ```

// ── Layer 1: Chart ───────────────────────────────────────────────────────────

/// Points, series, the chart sink seam, and the seed generator.
pub mod chart;

// ── Layer 2: Wire ────────────────────────────────────────────────────────────

/// Serde types for the backend's JSON formats.
pub mod wire;

/// Unified client error types.
pub mod error;

/// Debug-endpoint paths and feed URL derivation.
pub mod network;

// ── Layer 3: Feed ────────────────────────────────────────────────────────────

/// WebSocket feed client: events, config, connection lifecycle.
pub mod feed;

// ── Layer 4: HTTP ────────────────────────────────────────────────────────────

/// One-shot HTTP fetch of the exported history.
pub mod http;

// ── Layer 5: Session ─────────────────────────────────────────────────────────

/// `ChartSession` — the primary entry point.
pub mod session;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::chart::{ChartSink, ChartState, Point, SeedGenerator, Series};
    pub use crate::error::{ClientError, HttpError, WsError};
    pub use crate::feed::{FeedClient, FeedConfig, FeedEvent, ReadyState};
    pub use crate::http::ChartsHttp;
    pub use crate::network::Location;
    pub use crate::session::{ChartSession, ChartSessionBuilder};
    pub use crate::wire::{ExportedData, MemStatsUpdate, TimestampedDatum};
}
