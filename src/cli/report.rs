//! Plain-text rendering for CLI output

use std::fmt::Write as _;

use crate::services::presenter::page_footer;
use crate::services::{NameResolver, SystemAppClassifier};
use crate::types::{UsageDetail, UsagePage};

pub const NO_DATA_MESSAGE: &str = "No usage statistics available for the past 6 months.";

/// Ranked list for one page, followed by the page indicator
pub fn render_page(page: &UsagePage<UsageDetail>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🏆 Most Used Apps:");
    for detail in &page.items {
        let tag = if detail.is_system_app { " [system]" } else { "" };
        let _ = writeln!(
            out,
            "{:>3}. {} ({}) {}{}",
            detail.rank, detail.app_name, detail.application_id, detail.formatted_usage_time, tag
        );
        let _ = writeln!(
            out,
            "     Last used: {} | First used: {}",
            detail.last_used_formatted, detail.first_used_formatted
        );
    }
    if let Some(footer) = page_footer(page) {
        let _ = writeln!(out, "{}", footer);
    }
    out
}

/// Page as pretty-printed JSON, navigation state included
pub fn render_page_json(page: &UsagePage<UsageDetail>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(page)
}

/// One line per id: name, id, system/user, and the rule that decided it
pub fn render_classification(
    resolver: &NameResolver<'_>,
    classifier: &SystemAppClassifier<'_>,
    application_id: &str,
) -> String {
    let name = resolver.display_name(application_id);
    match classifier.matching_rule(application_id) {
        Some(rule) => format!("{}\t{}\tsystem ({})", name, application_id, rule.as_str()),
        None => format!("{}\t{}\tuser", name, application_id),
    }
}
