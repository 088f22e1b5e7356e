//! Chart domain — points, series, the sink seam, seed history.

pub mod seed;
pub mod state;

use serde::{Deserialize, Serialize};

pub use seed::SeedGenerator;
pub use state::ChartState;

/// A single `(time, y)` sample plotted on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unix timestamp in seconds.
    pub time: i64,
    pub y: f64,
}

impl Point {
    pub fn new(time: i64, y: f64) -> Self {
        Self { time, y }
    }
}

/// One chart series — an ordered run of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub values: Vec<Point>,
}

impl Series {
    pub fn new(values: Vec<Point>) -> Self {
        Self { values }
    }
}

/// The chart widget seam.
///
/// The widget itself is an external collaborator; anything that can take an
/// initial set of series and then accept appended points qualifies. The
/// session calls `render` exactly once with the seed history, then `push`
/// once per live sample.
pub trait ChartSink {
    /// Initial render with the full set of series.
    fn render(&mut self, series: Vec<Series>);

    /// Append points to the first series.
    fn push(&mut self, points: &[Point]);
}
