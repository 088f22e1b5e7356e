//! `ChartSession` — the owning controller.
//!
//! Wires the seed generator, feed client, and chart sink together: render
//! the synthetic history, open the feed, forward one point per sample, and
//! close the connection on shutdown. Everything the session touches lives in
//! the session; there is no module-level state.

use chrono::Utc;
use futures_util::StreamExt;

use crate::chart::{ChartSink, Point, SeedGenerator};
use crate::error::ClientError;
use crate::feed::{FeedClient, FeedConfig, FeedEvent};
use crate::network::Location;
use crate::wire::MemStatsUpdate;

/// Timestamp attached to a live sample.
///
/// Divides wall-clock milliseconds down to seconds, then by 1000 once more.
/// The web frontend bundled with the backend computes exactly this before
/// pushing a point, and both renderings must agree on the x-axis. See
/// DESIGN.md for why the second division is suspicious.
pub fn live_sample_time(now_ms: i64) -> i64 {
    (now_ms / 1000) / 1000
}

/// Convert one feed sample into the point forwarded to the chart.
fn sample_point(update: &MemStatsUpdate) -> Point {
    Point::new(
        live_sample_time(Utc::now().timestamp_millis()),
        update.bytes_allocated as f64,
    )
}

/// The primary entry point: one chart, one feed, one sink.
pub struct ChartSession<S: ChartSink> {
    sink: S,
    seed: SeedGenerator,
    seed_entries: Option<usize>,
    feed: FeedClient,
}

impl<S: ChartSink> ChartSession<S> {
    /// Render the seed history, open the feed, and forward one point per
    /// inbound sample until the connection ends.
    ///
    /// Deserialization errors are logged and skipped; only a dropped
    /// connection ends the loop. Cancel the returned future (e.g. from a
    /// `select!` arm) and call [`shutdown`](Self::shutdown) for a graceful
    /// early exit.
    pub async fn run(&mut self) -> Result<(), ClientError> {
        let history = self.seed.history(self.seed_entries);
        self.sink.render(history);

        self.feed.connect().await?;

        let events = self.feed.events();
        tokio::pin!(events);

        while let Some(event) = events.next().await {
            match event {
                FeedEvent::Connected => {
                    tracing::info!("Live feed open");
                }
                FeedEvent::Sample(update) => {
                    self.sink.push(&[sample_point(&update)]);
                }
                FeedEvent::Error(e) => {
                    tracing::warn!("Feed error: {}", e);
                }
                FeedEvent::Disconnected { code, reason } => {
                    tracing::warn!("Feed disconnected: code={:?} reason={}", code, reason);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Close the feed connection. The only explicit cleanup the session has.
    pub async fn shutdown(&mut self) -> Result<(), ClientError> {
        self.feed.disconnect().await?;
        Ok(())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Tear the session apart and keep the accumulated chart data.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ChartSessionBuilder {
    feed_config: FeedConfig,
    seed_entries: Option<usize>,
    seed_start: Option<i64>,
}

impl ChartSessionBuilder {
    /// Start building a session against a debug endpoint's HTTP base URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let location = Location::parse(base_url)?;
        Ok(Self {
            feed_config: FeedConfig::from(&location),
            seed_entries: None,
            seed_start: None,
        })
    }

    /// Override the number of seed points (default 60).
    pub fn seed_entries(mut self, entries: usize) -> Self {
        self.seed_entries = Some(entries);
        self
    }

    /// Pin the seed cursor to a fixed timestamp instead of the wall clock.
    pub fn seed_start(mut self, timestamp: i64) -> Self {
        self.seed_start = Some(timestamp);
        self
    }

    /// Replace the derived feed config entirely.
    pub fn feed_config(mut self, config: FeedConfig) -> Self {
        self.feed_config = config;
        self
    }

    pub fn build<S: ChartSink>(self, sink: S) -> ChartSession<S> {
        let seed = match self.seed_start {
            Some(ts) => SeedGenerator::starting_at(ts),
            None => SeedGenerator::new(),
        };

        ChartSession {
            sink,
            seed,
            seed_entries: self.seed_entries,
            feed: FeedClient::new(self.feed_config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartState;

    #[test]
    fn test_live_sample_time_double_division() {
        // 2023-11-14T22:13:20Z in millis
        let now_ms = 1_700_000_000_000;
        assert_eq!(live_sample_time(now_ms), 1_700_000);
    }

    #[test]
    fn test_sample_point_copies_bytes_allocated() {
        let update = MemStatsUpdate {
            ts: 0,
            bytes_allocated: 12_345_678,
            gc_pause: 0,
        };
        let before = live_sample_time(Utc::now().timestamp_millis());
        let point = sample_point(&update);
        let after = live_sample_time(Utc::now().timestamp_millis());

        assert_eq!(point.y, 12_345_678.0);
        assert!(point.time >= before && point.time <= after);
    }

    #[test]
    fn test_builder_derives_feed_url() {
        let builder = ChartSessionBuilder::new("http://localhost:8088").unwrap();
        assert_eq!(
            builder.feed_config.url,
            "ws://localhost:8088/debug/charts/data-feed"
        );
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = ChartSessionBuilder::new("not a url");
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_builder_seed_overrides() {
        let session = ChartSessionBuilder::new("http://localhost:8088")
            .unwrap()
            .seed_entries(5)
            .seed_start(1_000)
            .build(ChartState::new());

        assert_eq!(session.seed_entries, Some(5));
    }
}
