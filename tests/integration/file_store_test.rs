//! History persisted through the JSON-file store
//!
//! Each "execution context" opens its own store handle on the same file, the
//! way a popup and a background worker share browser storage.

use super::dispatcher_over;
use ioc_lookup::classifier::IndicatorType;
use ioc_lookup::history::{HistoryError, HistoryLog};
use ioc_lookup::store::{JsonFileStore, KeyValueStore, HISTORY_KEY};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_history_survives_new_context() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    let mut background = dispatcher_over(JsonFileStore::new(&path));
    background.handle_click("search-VirusTotal", "example.com").await;
    background.handle_click("search-Shodan", "9.9.9.9").await;

    let mut popup = HistoryLog::new(JsonFileStore::new(&path));
    let listing = popup.list(None).await;
    assert_eq!(listing.records.len(), 2);
    assert_eq!(listing.records[0].indicator_type, IndicatorType::Ip);
    assert_eq!(listing.records[1].tool, "VirusTotal");
}

#[tokio::test]
async fn test_clear_from_other_context() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    let mut writer = HistoryLog::new(JsonFileStore::new(&path));
    writer.record("example.com", "URLScan").await.unwrap();

    let mut archive = HistoryLog::new(JsonFileStore::new(&path));
    archive.clear().await.unwrap();

    assert!(writer.list(None).await.records.is_empty());
}

#[tokio::test]
async fn test_settings_keys_do_not_clobber_history() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    let mut dispatcher = dispatcher_over(JsonFileStore::new(&path));
    dispatcher.handle_click("search-Censys", "8.8.8.8").await;
    let _ = dispatcher.menu().await;

    let store = JsonFileStore::new(&path);
    assert!(store.get("enabledServices").await.unwrap().is_some());
    assert_eq!(
        store.get(HISTORY_KEY).await.unwrap().unwrap().as_array().unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_corrupt_file_degrades_to_empty_listing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "this is not json").unwrap();

    let mut log = HistoryLog::new(JsonFileStore::new(&path));
    let listing = log.list(None).await;
    assert!(listing.records.is_empty());
    assert!(matches!(
        listing.problem,
        Some(HistoryError::StoreUnavailable(_))
    ));

    // Recording refuses to overwrite a document it cannot read.
    assert!(log.record("example.com", "URLScan").await.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "this is not json");
}
