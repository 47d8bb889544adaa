//! Presentation helpers: pagination, duration/date strings, and the
//! multi-line usage summary.

use std::fmt::Write as _;

use chrono::{Local, TimeZone};

use crate::services::classifier::AppClassifier;
use crate::services::naming::NameResolver;
use crate::types::{AggregatedUsage, RawUsageRecord, UsageDetail, UsagePage};

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Date format for first/last-used timestamps, e.g. "Jan 05, 2024 at 14:30"
const DATE_FORMAT: &str = "%b %d, %Y at %H:%M";

/// Slice `items` into one page.
///
/// Zero items yields zero pages and an empty page 0. A zero `page_size` is
/// treated as 1, and `page` is clamped to `[0, total_pages - 1]`.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> UsagePage<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    if total_pages == 0 {
        return UsagePage {
            items: Vec::new(),
            current_page: 0,
            total_pages: 0,
            has_previous: false,
            has_next: false,
            page_size,
            total_items: 0,
        };
    }

    let current_page = page.min(total_pages - 1);
    let start = current_page * page_size;
    let end = (start + page_size).min(total_items);

    UsagePage {
        items: items[start..end].to_vec(),
        current_page,
        total_pages,
        has_previous: current_page > 0,
        has_next: current_page + 1 < total_pages,
        page_size,
        total_items,
    }
}

/// "1h 30m" when at least an hour, otherwise "59m"
pub fn format_duration(ms: i64) -> String {
    let ms = ms.max(0);
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms / MS_PER_MINUTE) % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Local-time rendering of an epoch-millis timestamp; `0` is "Never"
pub fn format_date(ms: i64) -> String {
    if ms == 0 {
        return "Never".to_string();
    }
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format(DATE_FORMAT).to_string(),
        None => "Unknown".to_string(),
    }
}

/// "Page 2 of 3", or `None` when everything fits on one page
pub fn page_footer<T>(page: &UsagePage<T>) -> Option<String> {
    (page.total_pages > 1)
        .then(|| format!("Page {} of {}", page.current_page + 1, page.total_pages))
}

/// Multi-line usage summary.
///
/// Screen time is summed over every raw record; the app count is the number
/// of apps actually listed. The header keeps its historical "6 Months"
/// wording even though records cover the last 7 days.
pub fn summary_text(
    raw_records: &[RawUsageRecord],
    apps_shown: usize,
    exclude_system_apps: bool,
) -> String {
    let total_ms = crate::services::Aggregator::total_foreground_ms(raw_records);
    let days = total_ms / MS_PER_DAY;
    let hours = (total_ms / MS_PER_HOUR) % 24;

    let mut out = String::new();
    let _ = writeln!(out, "📊 Usage Statistics (Past 6 Months)");
    let _ = writeln!(out, "Total screen time: {} days, {} hours", days, hours);
    let _ = writeln!(out, "Total apps used: {}", apps_shown);
    if exclude_system_apps {
        let _ = writeln!(out, "(System apps excluded)");
    }
    let _ = writeln!(out, "Raw data: {} entries", raw_records.len());
    out
}

/// Builds [`UsageDetail`]s from aggregated totals
pub struct Presenter<'a> {
    resolver: &'a NameResolver<'a>,
    classifier: &'a dyn AppClassifier,
}

impl<'a> Presenter<'a> {
    pub fn new(resolver: &'a NameResolver<'a>, classifier: &'a dyn AppClassifier) -> Self {
        Self {
            resolver,
            classifier,
        }
    }

    /// Project one aggregate at 1-based `rank`
    pub fn detail(&self, usage: &AggregatedUsage, rank: usize) -> UsageDetail {
        UsageDetail {
            rank,
            app_name: self.resolver.display_name(&usage.application_id),
            application_id: usage.application_id.clone(),
            total_usage_ms: usage.total_foreground_ms,
            formatted_usage_time: format_duration(usage.total_foreground_ms),
            last_used: usage.last_used_at,
            first_used: usage.first_seen_at,
            last_used_formatted: format_date(usage.last_used_at),
            first_used_formatted: format_date(usage.first_seen_at),
            is_system_app: self.classifier.is_system_app(&usage.application_id),
        }
    }

    /// Paginate the ranked list and project only the requested page
    pub fn page(
        &self,
        ranked: &[AggregatedUsage],
        page_size: usize,
        page: usize,
    ) -> UsagePage<UsageDetail> {
        let page = paginate(ranked, page_size, page);
        let start = page.start_index();
        let mut offset = 0;
        page.map(|usage| {
            offset += 1;
            self.detail(&usage, start + offset)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::package_catalog::{NoPackageMetadata, PackageCatalog};
    use crate::services::SystemAppClassifier;
    use crate::types::PackageInfo;

    fn make_usage(id: &str, total: i64) -> AggregatedUsage {
        AggregatedUsage {
            application_id: id.to_string(),
            total_foreground_ms: total,
            last_used_at: 0,
            first_seen_at: 0,
            last_seen_at: 0,
        }
    }

    fn make_raw(id: &str, duration: i64) -> RawUsageRecord {
        RawUsageRecord {
            application_id: id.to_string(),
            foreground_duration_ms: duration,
            last_used_at: 0,
            first_seen_at: 0,
            last_seen_at: 0,
        }
    }

    // ========== paginate() ==========

    #[test]
    fn test_paginate_23_items_page_size_10() {
        let items: Vec<usize> = (0..23).collect();

        let first = paginate(&items, 10, 0);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous);
        assert!(first.has_next);

        let second = paginate(&items, 10, 1);
        assert_eq!(second.items.len(), 10);
        assert_eq!(second.items[0], 10);
        assert!(second.has_previous);
        assert!(second.has_next);

        let last = paginate(&items, 10, 2);
        assert_eq!(last.items, vec![20, 21, 22]);
        assert_eq!(last.total_pages, 3);
        assert!(last.has_previous);
        assert!(!last.has_next);
    }

    #[test]
    fn test_paginate_empty_has_zero_pages() {
        let items: Vec<usize> = Vec::new();
        let page = paginate(&items, 10, 3);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 0);
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_paginate_clamps_out_of_range_page() {
        let items: Vec<usize> = (0..23).collect();
        let page = paginate(&items, 10, 99);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn test_paginate_zero_page_size_treated_as_one() {
        let items = vec!["a", "b"];
        let page = paginate(&items, 0, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items, vec!["b"]);
    }

    #[test]
    fn test_paginate_exact_multiple() {
        let items: Vec<usize> = (0..20).collect();
        let page = paginate(&items, 10, 1);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_next);
    }

    // ========== format_duration() ==========

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(0), "0m");
    }

    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration(3_540_000), "59m");
        assert_eq!(format_duration(59_999), "0m");
    }

    #[test]
    fn test_format_duration_hours_and_minutes() {
        assert_eq!(format_duration(5_400_000), "1h 30m");
        assert_eq!(format_duration(3_600_000), "1h 0m");
        assert_eq!(format_duration(26 * 3_600_000 + 5 * 60_000), "26h 5m");
    }

    #[test]
    fn test_format_duration_negative_clamped() {
        assert_eq!(format_duration(-1_000), "0m");
    }

    // ========== format_date() ==========

    #[test]
    fn test_format_date_zero_is_never() {
        assert_eq!(format_date(0), "Never");
    }

    #[test]
    fn test_format_date_local_time() {
        let ms = 1_704_465_000_000; // 2024-01-05 14:30 UTC
        let expected = Local
            .timestamp_millis_opt(ms)
            .unwrap()
            .format("%b %d, %Y at %H:%M")
            .to_string();
        assert_eq!(format_date(ms), expected);
        assert!(format_date(ms).contains(" at "));
    }

    // ========== page_footer() ==========

    #[test]
    fn test_page_footer() {
        let items: Vec<usize> = (0..23).collect();
        assert_eq!(
            page_footer(&paginate(&items, 10, 1)),
            Some("Page 2 of 3".to_string())
        );
        assert_eq!(page_footer(&paginate(&items, 50, 0)), None);
    }

    // ========== summary_text() ==========

    #[test]
    fn test_summary_text_lines() {
        let records = vec![
            make_raw("com.whatsapp", 26 * 3_600_000),
            make_raw("com.android.settings", 3 * 3_600_000),
            make_raw("com.zero", 0),
        ];
        let text = summary_text(&records, 1, true);
        assert_eq!(
            text,
            "📊 Usage Statistics (Past 6 Months)\n\
             Total screen time: 1 days, 5 hours\n\
             Total apps used: 1\n\
             (System apps excluded)\n\
             Raw data: 3 entries\n"
        );
    }

    #[test]
    fn test_summary_text_without_exclusion() {
        let text = summary_text(&[make_raw("com.whatsapp", 60_000)], 1, false);
        assert!(!text.contains("System apps excluded"));
        assert!(text.contains("Total screen time: 0 days, 0 hours"));
        assert!(text.ends_with("Raw data: 1 entries\n"));
    }

    // ========== Presenter ==========

    #[test]
    fn test_presenter_detail() {
        let catalog = PackageCatalog::from_entries([(
            "com.whatsapp",
            PackageInfo {
                label: Some("WhatsApp".into()),
                ..Default::default()
            },
        )]);
        let resolver = NameResolver::new(&catalog);
        let classifier = SystemAppClassifier::new(&catalog);
        let presenter = Presenter::new(&resolver, &classifier);

        let detail = presenter.detail(&make_usage("com.whatsapp", 5_400_000), 1);
        assert_eq!(detail.rank, 1);
        assert_eq!(detail.app_name, "WhatsApp");
        assert_eq!(detail.formatted_usage_time, "1h 30m");
        assert_eq!(detail.last_used_formatted, "Never");
        assert_eq!(detail.first_used_formatted, "Never");
        assert!(!detail.is_system_app);
    }

    #[test]
    fn test_presenter_page_ranks_are_global() {
        let resolver = NameResolver::new(&NoPackageMetadata);
        let classifier = SystemAppClassifier::new(&NoPackageMetadata);
        let presenter = Presenter::new(&resolver, &classifier);

        let ranked: Vec<AggregatedUsage> = (0..23)
            .map(|i| make_usage(&format!("com.vendor.app{:02}", i), 1_000_000 - i))
            .collect();
        let page = presenter.page(&ranked, 10, 2);

        assert_eq!(page.items.len(), 3);
        let ranks: Vec<usize> = page.items.iter().map(|d| d.rank).collect();
        assert_eq!(ranks, vec![21, 22, 23]);
        assert_eq!(page.items[0].app_name, "App20");
    }

    #[test]
    fn test_presenter_marks_system_apps() {
        let resolver = NameResolver::new(&NoPackageMetadata);
        let classifier = SystemAppClassifier::new(&NoPackageMetadata);
        let presenter = Presenter::new(&resolver, &classifier);

        let detail = presenter.detail(&make_usage("com.android.settings", 60_000), 3);
        assert!(detail.is_system_app);
        assert_eq!(detail.app_name, "Settings");
    }
}
