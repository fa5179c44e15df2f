//! Integration tests module for the IoC lookup core
//!
//! Shared helpers for driving the dispatcher and history log against real
//! store implementations.

pub mod end_to_end_test;
pub mod file_store_test;

use ioc_lookup::dispatch::{Dispatcher, RecordingTabOpener};
use ioc_lookup::history::HistoryLog;
use ioc_lookup::store::KeyValueStore;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        // No global setup needed yet; log output is dropped without a logger.
    });
}

/// Builds a dispatcher over `store` that records opened URLs.
pub fn dispatcher_over<S: KeyValueStore>(store: S) -> Dispatcher<S, RecordingTabOpener> {
    init_test_env();
    Dispatcher::new(HistoryLog::new(store), RecordingTabOpener::new())
}
