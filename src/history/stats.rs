//! Summary statistics over the history log.

use super::models::HistoryRecord;
use crate::classifier::IndicatorType;
use serde::Serialize;

/// Totals shown in the archive page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    /// Number of records.
    pub total_count: usize,
    /// Number of distinct indicator types present.
    pub distinct_type_count: usize,
    /// Tool used most often, `None` for an empty log.
    pub most_frequent_tool: Option<String>,
    /// Indicator type seen most often, `None` for an empty log.
    pub most_frequent_type: Option<IndicatorType>,
}

/// Computes [`HistoryStats`] in a single counting pass.
///
/// `records` is newest-first, as the log stores it; the pass walks it in
/// insertion order (oldest first). When two keys share the highest count the
/// one the pass met first wins.
pub fn aggregate(records: &[HistoryRecord]) -> HistoryStats {
    let mut tools: Vec<(&str, usize)> = Vec::new();
    let mut types: Vec<(IndicatorType, usize)> = Vec::new();

    for record in records.iter().rev() {
        bump(&mut tools, record.tool.as_str());
        bump(&mut types, record.indicator_type);
    }

    HistoryStats {
        total_count: records.len(),
        distinct_type_count: types.len(),
        most_frequent_tool: most_frequent(&tools).map(str::to_string),
        most_frequent_type: most_frequent(&types),
    }
}

// Counts stay in first-seen order, which is what makes the tie-break stable.
fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}

fn most_frequent<K: Copy>(counts: &[(K, usize)]) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for &(key, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(key, _)| key)
}
