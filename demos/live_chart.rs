//! Watch the live memory feed of a locally instrumented process.
//!
//! Start any process that exposes the debug charts endpoint on :8088, then:
//!
//! ```bash
//! cargo run --example live_chart
//! ```
//!
//! Prints one line per live sample until Ctrl-C.

use epochcharts_client::prelude::*;

/// A sink that prints instead of drawing.
struct ConsoleChart;

impl ChartSink for ConsoleChart {
    fn render(&mut self, series: Vec<Series>) {
        let seeded = series.first().map(|s| s.values.len()).unwrap_or(0);
        println!("chart seeded with {seeded} synthetic points");
    }

    fn push(&mut self, points: &[Point]) {
        for point in points {
            println!("t={} bytes_allocated={}", point.time, point.y);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url =
        std::env::args().nth(1).unwrap_or_else(|| "http://localhost:8088".to_string());

    let mut session = ChartSessionBuilder::new(&base_url)?.build(ConsoleChart);

    tokio::select! {
        result = session.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            println!("shutting down");
        }
    }

    session.shutdown().await?;
    Ok(())
}
