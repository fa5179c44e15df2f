//! Formatting utilities for history display.
//!
//! The popup shows a short list of recent lookups with relative times, the
//! archive page a full table plus summary statistics. Both render through
//! the helpers here. Indicator text comes from arbitrary web pages, so
//! anything placed in markup goes through [`escape_html`].

use super::models::HistoryRecord;
use super::stats::HistoryStats;
use crate::classifier::IndicatorType;
use chrono::{DateTime, Utc};

/// Badge color for an indicator type.
pub fn type_color(kind: IndicatorType) -> &'static str {
    match kind {
        IndicatorType::Ip => "#dc3545",
        IndicatorType::Hash => "#6f42c1",
        IndicatorType::Domain => "#007bff",
        IndicatorType::Url => "#28a745",
        IndicatorType::Unknown => "#6c757d",
    }
}

/// Short relative time: `just now`, `5m ago`, `3h ago`, `2d ago`.
pub fn format_time_ago(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*timestamp);

    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

/// Escapes text for use in HTML content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Formats a record for the archive list.
///
/// Format: "IOC [type] via TOOL (date)"
pub fn format_history_entry(record: &HistoryRecord) -> String {
    format!(
        "{} [{}] via {} ({})",
        record.indicator, record.indicator_type, record.tool, record.display_date
    )
}

/// Formats a record for the popup's recent list.
///
/// Format: "IOC [type] - 5m ago via TOOL"
pub fn format_history_entry_relative(record: &HistoryRecord, now: &DateTime<Utc>) -> String {
    format!(
        "{} [{}] - {} via {}",
        record.indicator,
        record.indicator_type,
        format_time_ago(&record.captured_at, now),
        record.tool
    )
}

/// Formats every record with [`format_history_entry`].
pub fn format_history_list(records: &[HistoryRecord]) -> Vec<String> {
    records.iter().map(format_history_entry).collect()
}

/// Formats the summary block shown above the archive table.
///
/// Missing "most used" values render as `-`.
pub fn format_stats(stats: &HistoryStats) -> String {
    let most_used_tool = stats.most_frequent_tool.as_deref().unwrap_or("-");
    let most_common_type = stats
        .most_frequent_type
        .map(|kind| kind.as_str())
        .unwrap_or("-");

    let mut output = String::new();
    output.push_str(&format!("Total Analyses:   {}\n", stats.total_count));
    output.push_str(&format!("IoC Types:        {}\n", stats.distinct_type_count));
    output.push_str(&format!("Most Used Tool:   {}\n", most_used_tool));
    output.push_str(&format!("Most Common Type: {}\n", most_common_type));
    output
}
