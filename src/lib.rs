//! IoC lookup core
//!
//! Logic behind an OSINT lookup browser extension: an analyst selects text on
//! a page, picks a lookup service (or a combination of services) from the
//! context menu, and the selection is opened on that service and recorded in
//! a local history.
//!
//! # Architecture
//!
//! - **classifier**: maps a string to `ip`, `hash`, `domain`, `url` or `unknown`
//! - **history**: bounded, newest-first lookup history with stats and formatting
//! - **store**: asynchronous key-value store seam plus memory and JSON-file stores
//! - **services**: service catalog, lookup URLs, enabled flags, combinations
//! - **dispatch**: context-menu model and click handling
//! - **config**: user settings
//!
//! The crate never talks to the network. Lookup URLs are handed to a
//! [`dispatch::TabOpener`] supplied by the host, and all state lives in a
//! [`store::KeyValueStore`] supplied by the host.
//!
//! # Example
//!
//! ```
//! use ioc_lookup::classifier::{classify, IndicatorType};
//! use ioc_lookup::services::lookup_url;
//!
//! let selection = "  44d88612fea8a8f36de82e1278abb02f ";
//! let indicator = selection.trim();
//!
//! assert_eq!(classify(indicator), IndicatorType::Hash);
//! assert_eq!(
//!     lookup_url("MalwareBazaar", indicator).as_deref(),
//!     Some("https://bazaar.abuse.ch/browse.php?search=44d88612fea8a8f36de82e1278abb02f")
//! );
//! ```

pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod history;
pub mod services;
pub mod store;

pub use classifier::{classify, IndicatorType};
pub use dispatch::{DispatchOutcome, Dispatcher, TabOpener};
pub use history::{HistoryError, HistoryLog, HistoryRecord, HistoryStats};
pub use store::{KeyValueStore, StoreError};
