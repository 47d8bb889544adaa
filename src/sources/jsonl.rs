//! JSONL usage export source
//!
//! Reads `*.jsonl` files under a data directory, one raw usage record per
//! line. Both the native camelCase keys and the OS field names
//! (`packageName`, `totalTimeInForeground`, ...) are accepted.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;

use crate::types::{AppTrackError, RawUsageRecord, Result};

use super::UsageSource;

/// One JSONL line (zero-copy with borrowed strings)
#[derive(Deserialize)]
struct UsageLine<'a> {
    #[serde(rename = "applicationId", alias = "packageName")]
    application_id: &'a str,
    #[serde(rename = "foregroundDurationMs", alias = "totalTimeInForeground")]
    foreground_duration_ms: i64,
    #[serde(rename = "lastUsedAt", alias = "lastTimeUsed", default)]
    last_used_at: i64,
    #[serde(rename = "firstSeenAt", alias = "firstTimeStamp", default)]
    first_seen_at: i64,
    #[serde(rename = "lastSeenAt", alias = "lastTimeStamp", default)]
    last_seen_at: i64,
}

/// Source backed by a directory of JSONL exports
pub struct JsonlUsageSource {
    data_dir: PathBuf,
}

impl JsonlUsageSource {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Data directory scanned for exports
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Glob pattern for export files, relative to the data directory
    pub fn file_pattern(&self) -> &str {
        "**/*.jsonl"
    }

    /// Collect all files matching the glob pattern
    pub fn collect_files(&self) -> Vec<PathBuf> {
        let pattern = self.data_dir.join(self.file_pattern());
        glob::glob(&pattern.to_string_lossy())
            .map(|paths| paths.filter_map(|e| e.ok()).collect())
            .unwrap_or_default()
    }

    /// Parse one export file, skipping blank and malformed lines
    pub fn parse_file(&self, path: &Path) -> Result<Vec<RawUsageRecord>> {
        let file = File::open(path).map_err(AppTrackError::Io)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_no, line_result) in reader.lines().enumerate() {
            let line = match line_result {
                Ok(l) => l,
                Err(_) => continue,
            };
            if line.trim().is_empty() {
                continue;
            }

            let mut line_bytes = line.into_bytes();
            match parse_line(&mut line_bytes) {
                Some(record) => records.push(record),
                None => tracing::debug!(
                    path = %path.display(),
                    line = line_no + 1,
                    "skipping malformed usage line"
                ),
            }
        }

        Ok(records)
    }
}

fn parse_line(line: &mut [u8]) -> Option<RawUsageRecord> {
    let data: UsageLine = simd_json::from_slice(line).ok()?;
    Some(RawUsageRecord {
        application_id: data.application_id.to_string(),
        foreground_duration_ms: data.foreground_duration_ms,
        last_used_at: data.last_used_at,
        first_seen_at: data.first_seen_at,
        last_seen_at: data.last_seen_at,
    })
}

impl UsageSource for JsonlUsageSource {
    fn name(&self) -> &str {
        "jsonl"
    }

    /// Access is granted when the data directory exists and can be listed
    fn has_permission(&self) -> bool {
        self.data_dir.is_dir() && fs::read_dir(&self.data_dir).is_ok()
    }

    fn access_hint(&self) -> String {
        format!(
            "Export usage records to {} or pass --data-dir.",
            self.data_dir.display()
        )
    }

    /// Parse all export files in parallel using rayon
    fn records(&self) -> Result<Vec<RawUsageRecord>> {
        let files = self.collect_files();
        let records: Vec<RawUsageRecord> = files
            .par_iter()
            .flat_map(|f| match self.parse_file(f) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(path = %f.display(), error = %e, "failed to parse usage export");
                    Vec::new()
                }
            })
            .collect();

        tracing::debug!(
            files = files.len(),
            entries = records.len(),
            "retrieved usage records"
        );
        Ok(records)
    }
}
