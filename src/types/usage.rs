//! Usage types for app screen-time tracking

use serde::{Deserialize, Serialize};

/// One per-interval usage record as exported by the OS usage-tracking service.
///
/// Timestamps are milliseconds since the Unix epoch; `0` means unknown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawUsageRecord {
    pub application_id: String,
    pub foreground_duration_ms: i64,
    #[serde(default)]
    pub last_used_at: i64,
    #[serde(default)]
    pub first_seen_at: i64,
    #[serde(default)]
    pub last_seen_at: i64,
}

/// Per-application totals folded from every raw record sharing one id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregatedUsage {
    pub application_id: String,
    pub total_foreground_ms: i64,
    pub last_used_at: i64,
    pub first_seen_at: i64,
    pub last_seen_at: i64,
}

impl AggregatedUsage {
    /// Empty accumulator. `first_seen_at` starts at `i64::MAX` so any known
    /// timestamp wins the minimum; call [`AggregatedUsage::finish`] before
    /// handing the value out.
    pub fn seed(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            total_foreground_ms: 0,
            last_used_at: 0,
            first_seen_at: i64::MAX,
            last_seen_at: 0,
        }
    }

    /// Fold one raw record into the totals.
    ///
    /// `first_seen_at` is a plain minimum, so an unknown (`0`) interval start
    /// makes the folded value unknown too.
    pub fn add(&mut self, record: &RawUsageRecord) {
        self.total_foreground_ms = self
            .total_foreground_ms
            .saturating_add(record.foreground_duration_ms.max(0));
        self.last_used_at = self.last_used_at.max(record.last_used_at);
        self.last_seen_at = self.last_seen_at.max(record.last_seen_at);
        self.first_seen_at = self.first_seen_at.min(record.first_seen_at);
    }

    /// Replace the min-seed sentinel with "unknown" when no record knew its first-seen time
    pub fn finish(mut self) -> Self {
        if self.first_seen_at == i64::MAX {
            self.first_seen_at = 0;
        }
        self
    }
}

/// OS package metadata for one installed application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PackageInfo {
    /// Registered application label
    #[serde(default)]
    pub label: Option<String>,
    /// Preinstalled in the system image
    #[serde(default)]
    pub system: bool,
    /// System app that has received an update
    #[serde(default)]
    pub updated_system: bool,
}

/// Display-ready projection of an [`AggregatedUsage`]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UsageDetail {
    /// 1-based position in the full ranked list
    pub rank: usize,
    pub app_name: String,
    pub application_id: String,
    pub total_usage_ms: i64,
    pub formatted_usage_time: String,
    pub last_used: i64,
    pub first_used: i64,
    pub last_used_formatted: String,
    pub first_used_formatted: String,
    pub is_system_app: bool,
}

/// One page of ranked usage details plus navigation state
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UsagePage<T> {
    pub items: Vec<T>,
    /// Zero-based
    pub current_page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub page_size: usize,
    pub total_items: usize,
}

impl<T> UsagePage<T> {
    /// Map page items while keeping navigation state
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> UsagePage<U> {
        UsagePage {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
            page_size: self.page_size,
            total_items: self.total_items,
        }
    }

    /// Global index of the first item on this page
    pub fn start_index(&self) -> usize {
        self.current_page * self.page_size
    }
}
