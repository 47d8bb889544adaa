//! Aggregator service for computing per-application usage totals

use std::collections::HashMap;

use crate::services::classifier::AppClassifier;
use crate::services::presenter::format_duration;
use crate::types::{AggregatedUsage, RawUsageRecord};

/// Number of top entries traced after each aggregation
const TRACE_TOP_N: usize = 10;

/// Aggregator for folding raw interval records into per-app totals
pub struct Aggregator;

impl Aggregator {
    /// Aggregate records by application id, sorted by total foreground time
    /// descending (ties by id ascending).
    ///
    /// Records with no foreground time are dropped before grouping, so an id
    /// that only ever had zero-length intervals never appears. With
    /// `exclude_system_apps`, the classifier is asked once per distinct id.
    pub fn aggregate<C>(
        records: &[RawUsageRecord],
        exclude_system_apps: bool,
        classifier: &C,
    ) -> Vec<AggregatedUsage>
    where
        C: AppClassifier + ?Sized,
    {
        if records.is_empty() {
            return Vec::new();
        }

        tracing::debug!(
            entries = records.len(),
            exclude_system_apps,
            "processing usage records"
        );

        let active: Vec<&RawUsageRecord> = records
            .iter()
            .filter(|r| r.foreground_duration_ms > 0)
            .collect();
        tracing::debug!(entries = active.len(), "after filtering for usage time > 0");

        let mut system_cache: HashMap<&str, bool> = HashMap::new();
        let kept: Vec<&RawUsageRecord> = if exclude_system_apps {
            active
                .into_iter()
                .filter(|r| {
                    let id = r.application_id.as_str();
                    let is_system = *system_cache.entry(id).or_insert_with(|| {
                        let is_system = classifier.is_system_app(id);
                        if is_system {
                            tracing::debug!(application_id = id, "filtering out system app");
                        }
                        is_system
                    });
                    !is_system
                })
                .collect()
        } else {
            active
        };
        tracing::debug!(entries = kept.len(), "after system app filtering");

        let mut by_app: HashMap<&str, AggregatedUsage> = HashMap::new();
        for record in kept {
            by_app
                .entry(record.application_id.as_str())
                .or_insert_with(|| AggregatedUsage::seed(record.application_id.as_str()))
                .add(record);
        }
        tracing::debug!(apps = by_app.len(), "grouped into unique apps");

        let mut result: Vec<AggregatedUsage> =
            by_app.into_values().map(AggregatedUsage::finish).collect();
        result.sort_by(|a, b| {
            b.total_foreground_ms
                .cmp(&a.total_foreground_ms)
                .then_with(|| a.application_id.cmp(&b.application_id))
        });

        for (i, usage) in result.iter().take(TRACE_TOP_N).enumerate() {
            tracing::debug!(
                rank = i + 1,
                application_id = %usage.application_id,
                usage = %format_duration(usage.total_foreground_ms),
                "top app"
            );
        }

        result
    }

    /// Raw screen time across every record, unfiltered
    pub fn total_foreground_ms(records: &[RawUsageRecord]) -> i64 {
        records
            .iter()
            .fold(0i64, |acc, r| acc.saturating_add(r.foreground_duration_ms.max(0)))
    }
}
