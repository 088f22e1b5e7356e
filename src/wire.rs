//! Serde types for the backend's JSON formats.
//!
//! The backend marshals its Go structs with their exported field names, so
//! everything on the wire is PascalCase (`BytesAllocated`, `GcPause`) and the
//! exported history uses the short tags `C`/`T`.

use serde::{Deserialize, Serialize};

/// One memory-stats sample pushed over the feed, once per second.
///
/// Only `BytesAllocated` is required; `Ts` and `GcPause` ride along but the
/// session's live path does not consume them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemStatsUpdate {
    #[serde(rename = "Ts", default)]
    pub ts: i64,
    #[serde(rename = "BytesAllocated")]
    pub bytes_allocated: u64,
    #[serde(rename = "GcPause", default)]
    pub gc_pause: u64,
}

/// A single retained sample in the exported history: `{"C": count, "T": ts}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedDatum {
    #[serde(rename = "C")]
    pub count: u64,
    #[serde(rename = "T")]
    pub ts: i64,
}

/// The full exported history served at `/debug/charts/data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportedData {
    #[serde(rename = "BytesAllocated", default)]
    pub bytes_allocated: Vec<TimestampedDatum>,
    #[serde(rename = "GcPauses", default)]
    pub gc_pauses: Vec<TimestampedDatum>,
}
