//! Synthetic seed history — fills the chart before the first live sample.

use chrono::Utc;

use super::{Point, Series};

/// Number of seed points when the caller does not say otherwise.
pub const DEFAULT_SEED_ENTRIES: usize = 60;

/// Flat placeholder value for every seed point, roughly in the range of a
/// small process's heap so the chart opens at a sensible scale.
pub const PLACEHOLDER_Y: f64 = 15_000_000.0;

/// Generates the synthetic seed window.
///
/// Holds a mutable unix-seconds cursor; every emitted point advances it by
/// one second, so consecutive calls keep producing strictly increasing
/// timestamps.
#[derive(Debug, Clone)]
pub struct SeedGenerator {
    timestamp: i64,
}

impl SeedGenerator {
    /// Start the cursor at the current wall clock.
    pub fn new() -> Self {
        Self::starting_at(Utc::now().timestamp())
    }

    /// Start the cursor at a fixed timestamp.
    pub fn starting_at(timestamp: i64) -> Self {
        Self { timestamp }
    }

    /// Produce the seed history: one series of `entries` points, one second
    /// apart, starting at the cursor. `None` or `Some(0)` falls back to
    /// [`DEFAULT_SEED_ENTRIES`].
    pub fn history(&mut self, entries: Option<usize>) -> Vec<Series> {
        let entries = match entries {
            Some(n) if n > 0 => n,
            _ => DEFAULT_SEED_ENTRIES,
        };

        let mut values = Vec::with_capacity(entries);
        for _ in 0..entries {
            values.push(Point::new(self.timestamp, self.value()));
            self.timestamp += 1;
        }

        vec![Series::new(values)]
    }

    /// Produce exactly one point at the cursor, then advance it.
    pub fn next(&mut self) -> Vec<Point> {
        let entry = vec![Point::new(self.timestamp, self.value())];
        self.timestamp += 1;
        entry
    }

    fn value(&self) -> f64 {
        PLACEHOLDER_Y
    }
}

impl Default for SeedGenerator {
    fn default() -> Self {
        Self::new()
    }
}
