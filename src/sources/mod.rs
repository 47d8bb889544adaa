//! Usage record sources
//!
//! A source is the read side of the OS usage-tracking service: it knows
//! whether usage access has been granted and returns the raw per-interval
//! records overlapping a time window.

mod jsonl;

pub use jsonl::JsonlUsageSource;

use crate::types::{RawUsageRecord, Result};

/// Trait for reading raw usage records
pub trait UsageSource: Send + Sync {
    /// Source name (e.g., "jsonl")
    fn name(&self) -> &str;

    /// Whether usage access has been granted
    fn has_permission(&self) -> bool;

    /// Where the user grants access when [`UsageSource::has_permission`] is false
    fn access_hint(&self) -> String {
        "Please enable in Settings > Usage Access.".to_string()
    }

    /// Every record the source holds, unfiltered
    fn records(&self) -> Result<Vec<RawUsageRecord>>;

    /// Records whose interval overlaps `[start_ms, end_ms]`
    fn query(&self, start_ms: i64, end_ms: i64) -> Result<Vec<RawUsageRecord>> {
        let mut records = self.records()?;
        records.retain(|r| overlaps_window(r, start_ms, end_ms));
        Ok(records)
    }
}

/// Interval overlap test; unknown (`0`) bounds never exclude a record
pub fn overlaps_window(record: &RawUsageRecord, start_ms: i64, end_ms: i64) -> bool {
    let ends_after_start = record.last_seen_at == 0 || record.last_seen_at >= start_ms;
    let starts_before_end = record.first_seen_at == 0 || record.first_seen_at <= end_ms;
    ends_after_start && starts_before_end
}
