//! Retained-series chart state — app-owned, widget-free.

use super::{ChartSink, Point, Series};

/// A [`ChartSink`] that simply retains what it is given.
///
/// Embedders that render with an actual widget implement `ChartSink` on
/// their own type; this one serves headless consumers and tests.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    series: Vec<Series>,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// The first series, if any — the one live samples land in.
    pub fn primary(&self) -> Option<&Series> {
        self.series.first()
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }
}

impl ChartSink for ChartState {
    fn render(&mut self, series: Vec<Series>) {
        self.series = series;
    }

    fn push(&mut self, points: &[Point]) {
        if self.series.is_empty() {
            self.series.push(Series::default());
        }
        self.series[0].values.extend_from_slice(points);
    }
}
