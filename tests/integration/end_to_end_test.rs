//! End-to-end tests for the lookup workflow
//!
//! These tests go from a context-menu click through tab opening, history
//! recording, listing, statistics and clearing, without a browser.

use super::dispatcher_over;
use ioc_lookup::classifier::IndicatorType;
use ioc_lookup::history::{format_stats, recent, HistoryLog, MAX_HISTORY_ENTRIES};
use ioc_lookup::services::{add_combination, Combination, EnabledServices};
use ioc_lookup::store::{MemoryStore, HISTORY_KEY};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_click_list_stats_clear_workflow() {
    let mut dispatcher = dispatcher_over(MemoryStore::new());

    // Step 1: a few lookups from the context menu
    dispatcher.handle_click("search-Shodan", "8.8.8.8").await;
    dispatcher.handle_click("search-VirusTotal", "example.com").await;
    dispatcher
        .handle_click("search-VirusTotal", " https://example.com/login ")
        .await;
    dispatcher.handle_click("search-Shodan", "1.1.1.1").await;

    assert_eq!(dispatcher.opener().opened().len(), 4);

    // Step 2: newest first, filterable
    let listing = dispatcher.history_mut().list(None).await;
    let indicators: Vec<&str> = listing.records.iter().map(|r| r.indicator.as_str()).collect();
    assert_eq!(
        indicators,
        vec!["1.1.1.1", "https://example.com/login", "example.com", "8.8.8.8"]
    );

    let urls = dispatcher.history_mut().list(Some(IndicatorType::Url)).await;
    assert_eq!(urls.records.len(), 1);

    // Step 3: popup shows only the most recent entries
    assert_eq!(recent(&listing.records, 2).len(), 2);

    // Step 4: archive statistics
    let stats = dispatcher.history_mut().aggregate().await;
    assert_eq!(stats.total_count, 4);
    assert_eq!(stats.distinct_type_count, 3);
    assert_eq!(stats.most_frequent_tool.as_deref(), Some("Shodan"));
    assert_eq!(stats.most_frequent_type, Some(IndicatorType::Ip));
    assert!(format_stats(&stats).contains("Most Used Tool:   Shodan"));

    // Step 5: clear
    dispatcher.history_mut().clear().await.unwrap();
    assert!(dispatcher.history_mut().list(None).await.records.is_empty());
    assert_eq!(dispatcher.history_mut().aggregate().await.total_count, 0);
}

#[tokio::test]
async fn test_tie_break_across_full_workflow() {
    let mut dispatcher = dispatcher_over(MemoryStore::new());
    let combos = [
        Combination::new("X", vec!["Shodan".into(), "Censys".into()]).unwrap(),
        Combination::new("Y", vec!["URLScan".into(), "VirusTotal".into()]).unwrap(),
    ];
    for combo in combos {
        add_combination(dispatcher.history().store(), combo)
            .await
            .unwrap();
    }

    for menu_id in ["combo-0", "combo-1", "combo-0", "combo-1"] {
        dispatcher.handle_click(menu_id, "example.org").await;
    }

    let stats = dispatcher.history_mut().aggregate().await;
    assert_eq!(stats.total_count, 4);
    assert_eq!(stats.most_frequent_tool.as_deref(), Some("X"));
    assert_eq!(dispatcher.opener().opened().len(), 8);
}

#[tokio::test]
async fn test_history_cap_through_dispatcher() {
    let mut dispatcher = dispatcher_over(MemoryStore::new());

    for i in 0..150 {
        dispatcher
            .handle_click("search-GreyNoise", &format!("10.0.{}.{}", i / 256, i % 256))
            .await;
    }

    let listing = dispatcher.history_mut().list(None).await;
    assert_eq!(listing.records.len(), MAX_HISTORY_ENTRIES);
    assert_eq!(listing.records[0].indicator, "10.0.0.149");
    assert_eq!(listing.records[99].indicator, "10.0.0.50");
    assert_eq!(
        dispatcher.history().store().peek(HISTORY_KEY).unwrap().as_array().unwrap().len(),
        100
    );
}

#[tokio::test]
async fn test_menu_follows_settings() {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = dispatcher_over(Arc::clone(&store));

    let mut services = EnabledServices::load(&*store).await;
    services.set_enabled(&*store, "ThreatCrowd", false).await.unwrap();
    add_combination(
        &*store,
        Combination::new("IP", vec!["Shodan".into(), "AbuseIPDB".into()]).unwrap(),
    )
    .await
    .unwrap();

    let ids: Vec<String> = dispatcher.menu().await.into_iter().map(|e| e.id).collect();
    assert_eq!(ids[1], "combo-0");
    assert_eq!(ids[2], "separator-1");
    assert!(!ids.contains(&"search-ThreatCrowd".to_string()));
    assert_eq!(ids.len(), 1 + 1 + 1 + 9);
}

#[tokio::test]
async fn test_legacy_stored_history_is_read() {
    let store = MemoryStore::with_value(
        HISTORY_KEY,
        json!([
            {
                "ioc": "evil.example",
                "tool": "URLScan",
                "type": "domain",
                "timestamp": 1_700_000_100_000i64,
                "date": "11/14/2023, 10:15:00 PM"
            },
            {
                "ioc": "44d88612fea8a8f36de82e1278abb02f",
                "tool": "Malware sweep",
                "type": "hash",
                "timestamp": 1_700_000_000_000i64,
                "date": "11/14/2023, 10:13:20 PM"
            }
        ]),
    );
    let mut log = HistoryLog::new(store);

    let listing = log.list(None).await;
    assert!(!listing.is_degraded());
    assert_eq!(listing.records.len(), 2);
    assert_eq!(listing.records[1].display_date, "11/14/2023, 10:13:20 PM");

    log.record("8.8.4.4", "Shodan").await.unwrap();
    let listing = log.list(None).await;
    assert_eq!(listing.records[0].indicator, "8.8.4.4");
    assert_eq!(listing.records[2].tool, "Malware sweep");
}
