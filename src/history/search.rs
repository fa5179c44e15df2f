//! Search and filtering over history records.
//!
//! All functions keep the input order, so a newest-first log stays
//! newest-first.

use super::models::HistoryRecord;
use crate::classifier::IndicatorType;

/// Returns the records whose type equals `kind`.
pub fn filter_by_type(kind: IndicatorType, records: &[HistoryRecord]) -> Vec<HistoryRecord> {
    records
        .iter()
        .filter(|record| record.indicator_type == kind)
        .cloned()
        .collect()
}

/// Returns the records dispatched through `tool` (exact, case-sensitive).
pub fn filter_by_tool(tool: &str, records: &[HistoryRecord]) -> Vec<HistoryRecord> {
    records
        .iter()
        .filter(|record| record.tool == tool)
        .cloned()
        .collect()
}

/// Searches records using case-insensitive substring matching on the
/// indicator and the tool name. An empty query matches everything.
pub fn search_history(query: &str, records: &[HistoryRecord]) -> Vec<HistoryRecord> {
    if query.is_empty() {
        return records.to_vec();
    }

    let query_lower = query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            record.indicator.to_lowercase().contains(&query_lower)
                || record.tool.to_lowercase().contains(&query_lower)
        })
        .cloned()
        .collect()
}

/// Returns the first `count` records, i.e. the most recent ones.
pub fn recent(records: &[HistoryRecord], count: usize) -> &[HistoryRecord] {
    &records[..count.min(records.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<HistoryRecord> {
        vec![
            HistoryRecord::new("https://evil.example/payload", "URLScan"),
            HistoryRecord::new("8.8.8.8", "Shodan"),
            HistoryRecord::new("Evil.example", "VirusTotal"),
            HistoryRecord::new("1.1.1.1", "AbuseIPDB"),
        ]
    }

    #[test]
    fn test_filter_by_type_keeps_order() {
        let ips = filter_by_type(IndicatorType::Ip, &sample());
        let names: Vec<_> = ips.iter().map(|r| r.indicator.as_str()).collect();
        assert_eq!(names, vec!["8.8.8.8", "1.1.1.1"]);
    }

    #[test]
    fn test_filter_by_tool() {
        assert_eq!(filter_by_tool("Shodan", &sample()).len(), 1);
        assert!(filter_by_tool("shodan", &sample()).is_empty());
    }

    #[test]
    fn test_search_history() {
        let records = sample();
        assert_eq!(search_history("EVIL", &records).len(), 2);
        assert_eq!(search_history("abuse", &records).len(), 1);
        assert_eq!(search_history("", &records).len(), 4);
        assert!(search_history("nothing-here", &records).is_empty());
    }

    #[test]
    fn test_recent() {
        let records = sample();
        assert_eq!(recent(&records, 2).len(), 2);
        assert_eq!(recent(&records, 2)[0].tool, "URLScan");
        assert_eq!(recent(&records, 10).len(), 4);
        assert!(recent(&[], 5).is_empty());
    }
}
