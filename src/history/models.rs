//! Data models for the lookup history.
//!
//! This module defines the record stored for every dispatched lookup and the
//! errors the history log reports.

use crate::classifier::{classify, IndicatorType};
use crate::store::StoreError;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of records the history log ever holds.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// One completed lookup dispatch.
///
/// Serialized with the field names the browser storage has always used:
/// `{ioc, tool, type, timestamp, date}`, `timestamp` in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The selected text exactly as dispatched.
    ///
    /// Comes straight from a web page, so it must be escaped before being
    /// placed in markup.
    #[serde(rename = "ioc")]
    pub indicator: String,

    /// Service or combination name the lookup was sent to.
    pub tool: String,

    /// Category assigned when the record was created.
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,

    /// When the lookup was dispatched.
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub captured_at: DateTime<Utc>,

    /// Local-time rendering of `captured_at`, frozen at creation.
    #[serde(rename = "date")]
    pub display_date: String,
}

impl HistoryRecord {
    /// Creates a record for `indicator` sent to `tool`, stamped now.
    pub fn new(indicator: &str, tool: &str) -> Self {
        Self::at(indicator, tool, Utc::now())
    }

    /// Creates a record with an explicit capture time.
    ///
    /// The indicator is classified and the display date rendered here, once.
    pub fn at(indicator: &str, tool: &str, captured_at: DateTime<Utc>) -> Self {
        Self {
            indicator: indicator.to_string(),
            tool: tool.to_string(),
            indicator_type: classify(indicator),
            captured_at,
            display_date: format_display_date(&captured_at),
        }
    }
}

/// Renders a timestamp the way the archive table shows it, in local time.
///
/// Format: `M/D/YYYY, h:mm:ss AM`
pub fn format_display_date(timestamp: &DateTime<Utc>) -> String {
    let local_time: DateTime<Local> = timestamp.with_timezone(&Local);
    local_time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Errors that can occur during history operations.
///
/// All of them are recoverable: callers degrade to an empty history.
#[derive(Debug)]
pub enum HistoryError {
    /// The key-value store could not be read.
    StoreUnavailable(StoreError),

    /// Persisting the updated history failed. The stored value is unchanged.
    StoreWriteFailed(StoreError),

    /// The stored history value is not a sequence of records, or some of
    /// its entries are not valid records.
    MalformedStoredValue(String),

    /// The indicator is empty or whitespace only. Nothing is written.
    EmptyIndicator,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::StoreUnavailable(err) => {
                write!(f, "History store unavailable: {}", err)
            }
            HistoryError::StoreWriteFailed(err) => {
                write!(f, "History write failed: {}", err)
            }
            HistoryError::MalformedStoredValue(reason) => {
                write!(f, "Stored history is malformed: {}", reason)
            }
            HistoryError::EmptyIndicator => write!(f, "Cannot record an empty indicator"),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::StoreUnavailable(err) => Some(err),
            HistoryError::StoreWriteFailed(err) => Some(err),
            HistoryError::MalformedStoredValue(_) | HistoryError::EmptyIndicator => None,
        }
    }
}
