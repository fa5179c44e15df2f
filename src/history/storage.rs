//! The bounded, newest-first history log.
//!
//! The whole history lives under one key of a [`KeyValueStore`] as a JSON
//! array. Every mutation is a read-modify-write of that array: read it in
//! full, change it in memory, write it back as one value.
//!
//! # Concurrency
//!
//! Two execution contexts sharing a store (a popup and a background worker,
//! for instance) can interleave their read-modify-write cycles. The later
//! write then silently replaces the earlier one, dropping the record it
//! added. The store offers no compare-and-swap, so this log does not try to
//! detect or repair that.

use super::models::{HistoryError, HistoryRecord, MAX_HISTORY_ENTRIES};
use super::stats::{aggregate, HistoryStats};
use crate::classifier::IndicatorType;
use crate::config::ExtensionConfig;
use crate::store::{KeyValueStore, StoreError, HISTORY_KEY};
use log::{debug, warn};
use serde_json::Value;

/// Configuration for the history log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of records to keep. Never above [`MAX_HISTORY_ENTRIES`].
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_HISTORY_ENTRIES,
        }
    }
}

impl HistoryConfig {
    /// Builds the history settings from the extension configuration.
    pub fn from_config(config: &ExtensionConfig) -> Self {
        Self {
            max_entries: config.history_limit.clamp(1, MAX_HISTORY_ENTRIES),
        }
    }
}

/// Result of reading the history.
///
/// Reading never fails outright. If the store cannot be read or holds
/// something other than an array, `records` is empty and `problem` says why.
/// If only some entries are invalid, `records` holds the ones that decoded
/// and `problem` is [`HistoryError::MalformedStoredValue`].
#[derive(Debug)]
pub struct HistoryListing {
    /// Records, newest first.
    pub records: Vec<HistoryRecord>,

    /// Why the listing is empty or incomplete, if it is.
    pub problem: Option<HistoryError>,
}

impl HistoryListing {
    /// Returns `true` if the listing was degraded by a store problem.
    pub fn is_degraded(&self) -> bool {
        self.problem.is_some()
    }
}

/// History log bound to one store, instantiated per execution context.
pub struct HistoryLog<S> {
    store: S,
    config: HistoryConfig,
    records: Vec<HistoryRecord>,
}

impl<S: KeyValueStore> HistoryLog<S> {
    /// Creates a log with the default 100-entry cap.
    pub fn new(store: S) -> Self {
        Self::with_config(store, HistoryConfig::default())
    }

    /// Creates a log with custom configuration.
    ///
    /// `max_entries` is clamped to `1..=MAX_HISTORY_ENTRIES`.
    pub fn with_config(store: S, mut config: HistoryConfig) -> Self {
        config.max_entries = config.max_entries.clamp(1, MAX_HISTORY_ENTRIES);
        Self {
            store,
            config,
            records: Vec::new(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The effective configuration.
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Records as of the last successful read or write, newest first.
    pub fn cached(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Classifies `indicator`, prepends a new record and persists the log.
    ///
    /// # Errors
    ///
    /// - `HistoryError::EmptyIndicator` if `indicator` is blank; nothing is
    ///   read or written.
    /// - `HistoryError::StoreUnavailable` if the current log cannot be read;
    ///   nothing is written.
    /// - `HistoryError::StoreWriteFailed` if persisting fails; the record is
    ///   dropped and not retried.
    ///
    /// A stored value that is not an array is replaced by a fresh log holding
    /// only the new record. Individual entries that fail to decode are kept
    /// as stored, so they still count toward the cap.
    pub async fn record(
        &mut self,
        indicator: &str,
        tool: &str,
    ) -> Result<HistoryRecord, HistoryError> {
        if indicator.trim().is_empty() {
            return Err(HistoryError::EmptyIndicator);
        }
        self.insert(HistoryRecord::new(indicator, tool)).await
    }

    /// Prepends an already-built record and persists the log.
    ///
    /// Same semantics as [`HistoryLog::record`].
    pub async fn insert(&mut self, record: HistoryRecord) -> Result<HistoryRecord, HistoryError> {
        if record.indicator.trim().is_empty() {
            return Err(HistoryError::EmptyIndicator);
        }

        let mut items = match self.read_items().await {
            Ok(items) => items,
            Err(HistoryError::MalformedStoredValue(reason)) => {
                warn!("Replacing malformed history value: {}", reason);
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        let value = serde_json::to_value(&record)
            .map_err(|e| HistoryError::StoreWriteFailed(StoreError::Serialization(e)))?;
        items.insert(0, value);
        items.truncate(self.config.max_entries);

        self.write_items(items.clone()).await?;
        let (records, _) = parse_records(items);
        debug!(
            "Recorded {} lookup via {} ({} entries)",
            record.indicator_type,
            record.tool,
            records.len()
        );
        self.records = records;

        Ok(record)
    }

    /// Returns the persisted records, newest first.
    ///
    /// With a `filter`, only records of that type are returned, in the same
    /// order. Read failures degrade to an empty listing.
    pub async fn list(&mut self, filter: Option<IndicatorType>) -> HistoryListing {
        let (records, problem) = match self.read_items().await {
            Ok(items) => {
                let total = items.len();
                let (records, skipped) = parse_records(items);
                let problem = (skipped > 0).then(|| {
                    HistoryError::MalformedStoredValue(format!(
                        "{} of {} entries are not valid records",
                        skipped, total
                    ))
                });
                (records, problem)
            }
            Err(err) => {
                warn!("Treating history as empty: {}", err);
                (Vec::new(), Some(err))
            }
        };

        self.records = records;
        let records = match filter {
            Some(kind) => super::search::filter_by_type(kind, &self.records),
            None => self.records.clone(),
        };
        HistoryListing { records, problem }
    }

    /// Replaces the persisted log with an empty one.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::StoreWriteFailed` if the store rejects the write.
    pub async fn clear(&mut self) -> Result<(), HistoryError> {
        self.write_items(Vec::new()).await?;
        self.records.clear();
        Ok(())
    }

    /// Summarises the persisted log.
    ///
    /// A log that cannot be read summarises as empty.
    pub async fn aggregate(&mut self) -> HistoryStats {
        let listing = self.list(None).await;
        aggregate(&listing.records)
    }

    async fn read_items(&self) -> Result<Vec<Value>, HistoryError> {
        let value = self
            .store
            .get(HISTORY_KEY)
            .await
            .map_err(HistoryError::StoreUnavailable)?;

        match value {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(HistoryError::MalformedStoredValue(format!(
                "expected an array, found {}",
                json_kind(&other)
            ))),
        }
    }

    async fn write_items(&self, items: Vec<Value>) -> Result<(), HistoryError> {
        self.store
            .set(HISTORY_KEY, Value::Array(items))
            .await
            .map_err(HistoryError::StoreWriteFailed)
    }
}

/// Decodes stored items, skipping any that are not valid records.
///
/// Returns the decoded records and the number of items skipped.
fn parse_records(items: Vec<Value>) -> (Vec<HistoryRecord>, usize) {
    let mut records = Vec::with_capacity(items.len());
    let mut corrupted = 0;

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<HistoryRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                corrupted += 1;
                warn!("Skipping corrupted history entry at index {}: {}", index, e);
            }
        }
    }

    if corrupted > 0 && corrupted > records.len() {
        warn!(
            "History has significant corruption ({} corrupted entries, {} valid)",
            corrupted,
            records.len()
        );
    }

    (records, corrupted)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
