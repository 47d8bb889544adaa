//! One usage refresh: permission check, window query, aggregation.
//!
//! Records are fetched fresh on every refresh; nothing is cached between
//! calls.

use chrono::{DateTime, Local, TimeDelta};

use crate::services::classifier::AppClassifier;
use crate::services::config::DEFAULT_WINDOW_DAYS;
use crate::services::presenter::summary_text;
use crate::services::Aggregator;
use crate::sources::UsageSource;
use crate::types::{AggregatedUsage, AppTrackError, RawUsageRecord, Result};

/// Result of a refresh that had usage access
#[derive(Debug)]
pub enum LoadOutcome {
    /// At least one app had foreground time
    Loaded(UsageReport),
    /// Nothing left after filtering
    NoData,
}

/// Raw records and the ranked per-app totals built from them
#[derive(Debug, Clone)]
pub struct UsageReport {
    pub raw: Vec<RawUsageRecord>,
    pub ranked: Vec<AggregatedUsage>,
    pub exclude_system_apps: bool,
}

impl UsageReport {
    /// Multi-line summary for this report
    pub fn summary(&self) -> String {
        summary_text(&self.raw, self.ranked.len(), self.exclude_system_apps)
    }
}

/// Loads and aggregates usage records from a source
pub struct UsageLoader<'a> {
    source: &'a dyn UsageSource,
    window_days: i64,
}

impl<'a> UsageLoader<'a> {
    pub fn new(source: &'a dyn UsageSource) -> Self {
        Self {
            source,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_window_days(mut self, window_days: i64) -> Self {
        self.window_days = window_days;
        self
    }

    /// Refresh ending now
    pub fn refresh<C>(&self, exclude_system_apps: bool, classifier: &C) -> Result<LoadOutcome>
    where
        C: AppClassifier + ?Sized,
    {
        self.refresh_at(Local::now(), exclude_system_apps, classifier)
    }

    /// Refresh over `[now - window_days, now]`.
    ///
    /// Fails with [`AppTrackError::PermissionDenied`], an I/O error from the
    /// source, or [`AppTrackError::Config`] when the window cannot be
    /// represented; per-record problems degrade silently.
    pub fn refresh_at<C>(
        &self,
        now: DateTime<Local>,
        exclude_system_apps: bool,
        classifier: &C,
    ) -> Result<LoadOutcome>
    where
        C: AppClassifier + ?Sized,
    {
        if !self.source.has_permission() {
            return Err(AppTrackError::PermissionDenied(format!(
                "Usage statistics permission not granted. {}",
                self.source.access_hint()
            )));
        }

        let (start_ms, end_ms) = self.window(now)?;
        let raw = self.source.query(start_ms, end_ms)?;
        tracing::debug!(
            source = self.source.name(),
            entries = raw.len(),
            window_days = self.window_days,
            "retrieved usage stats entries"
        );

        if raw.is_empty() {
            return Ok(LoadOutcome::NoData);
        }

        let ranked = Aggregator::aggregate(&raw, exclude_system_apps, classifier);
        if ranked.is_empty() {
            return Ok(LoadOutcome::NoData);
        }

        Ok(LoadOutcome::Loaded(UsageReport {
            raw,
            ranked,
            exclude_system_apps,
        }))
    }

    fn window(&self, now: DateTime<Local>) -> Result<(i64, i64)> {
        let start = TimeDelta::try_days(self.window_days)
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| {
                AppTrackError::Config(format!(
                    "window of {} days is out of range",
                    self.window_days
                ))
            })?;
        Ok((start.timestamp_millis(), now.timestamp_millis()))
    }
}
