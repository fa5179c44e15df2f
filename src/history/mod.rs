//! Lookup history tracking and persistence.
//!
//! Every dispatched lookup becomes a [`HistoryRecord`] prepended to a
//! bounded, newest-first log held in a key-value store.
//!
//! # Features
//!
//! - Classify and record lookups, capped at 100 entries
//! - List with an optional indicator-type filter
//! - Clear the whole log
//! - Summary statistics with a stable tie-break
//! - Corrupted entries are skipped and reported instead of failing the read
//!
//! # Example
//!
//! ```no_run
//! use ioc_lookup::history::{HistoryError, HistoryLog};
//! use ioc_lookup::store::MemoryStore;
//!
//! # async fn example() -> Result<(), HistoryError> {
//! let mut log = HistoryLog::new(MemoryStore::new());
//! log.record("8.8.8.8", "Shodan").await?;
//! let listing = log.list(None).await;
//! assert_eq!(listing.records.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod search;
pub mod stats;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use models::{format_display_date, HistoryError, HistoryRecord, MAX_HISTORY_ENTRIES};
pub use search::{filter_by_tool, filter_by_type, recent, search_history};
pub use stats::{aggregate, HistoryStats};
pub use storage::{HistoryConfig, HistoryListing, HistoryLog};
pub use ui::{
    escape_html, format_history_entry, format_history_entry_relative, format_history_list,
    format_stats, format_time_ago, type_color,
};
