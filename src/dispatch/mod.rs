//! Turning a menu click into opened tabs and a history record.
//!
//! The host supplies the clicked menu entry id and the selected text. The
//! [`Dispatcher`] resolves the lookup URL(s), hands them to a [`TabOpener`]
//! and records one history entry per click.
//!
//! # Example
//!
//! ```no_run
//! use ioc_lookup::dispatch::{Dispatcher, RecordingTabOpener};
//! use ioc_lookup::history::HistoryLog;
//! use ioc_lookup::store::MemoryStore;
//!
//! # async fn example() {
//! let mut dispatcher = Dispatcher::new(HistoryLog::new(MemoryStore::new()), RecordingTabOpener::new());
//! let outcome = dispatcher.handle_click("search-Shodan", " 8.8.8.8 ").await;
//! assert_eq!(outcome.opened, vec!["https://www.shodan.io/search?query=8.8.8.8"]);
//! # }
//! ```

pub mod menu;
pub mod opener;

pub use menu::{build_menu, MenuAction, MenuEntry, MenuEntryKind};
pub use opener::{RecordingTabOpener, TabError, TabOpener};

use crate::history::{HistoryError, HistoryLog, HistoryRecord};
use crate::services::{find_service, load_combinations, Combination, EnabledServices};
use crate::store::KeyValueStore;
use log::{debug, error, warn};
use std::fmt;

/// What a click actually did.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// URLs successfully handed to the tab opener.
    pub opened: Vec<String>,

    /// The history record written, if any.
    pub record: Option<HistoryRecord>,

    /// Why recording failed, if it did. Tabs are still opened.
    pub history_problem: Option<HistoryError>,
}

impl DispatchOutcome {
    /// Returns `true` if the click was ignored entirely.
    pub fn is_ignored(&self) -> bool {
        self.opened.is_empty() && self.record.is_none() && self.history_problem.is_none()
    }
}

/// Errors from re-running a stored lookup.
#[derive(Debug)]
pub enum DispatchError {
    /// The stored tool is not a known service.
    UnknownService(String),

    /// The tab could not be opened.
    Tab(TabError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownService(tool) => write!(f, "Unknown tool: {}", tool),
            DispatchError::Tab(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Tab(err) => Some(err),
            DispatchError::UnknownService(_) => None,
        }
    }
}

impl From<TabError> for DispatchError {
    fn from(err: TabError) -> Self {
        DispatchError::Tab(err)
    }
}

/// Handles menu clicks and re-runs for one execution context.
pub struct Dispatcher<S, T> {
    history: HistoryLog<S>,
    opener: T,
}

impl<S: KeyValueStore, T: TabOpener> Dispatcher<S, T> {
    pub fn new(history: HistoryLog<S>, opener: T) -> Self {
        Self { history, opener }
    }

    pub fn history(&self) -> &HistoryLog<S> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryLog<S> {
        &mut self.history
    }

    pub fn opener(&self) -> &T {
        &self.opener
    }

    /// Builds the context menu from the stored settings.
    pub async fn menu(&self) -> Vec<MenuEntry> {
        let store = self.history.store();
        let services = EnabledServices::load(store).await;
        let combinations = load_combinations(store).await;
        build_menu(&services, &combinations)
    }

    /// Handles a click on the menu entry `menu_item_id` with `selection`.
    ///
    /// The selection is trimmed first; an empty selection, an unrecognised
    /// id, an unknown service or a missing combination is ignored.
    pub async fn handle_click(&mut self, menu_item_id: &str, selection: &str) -> DispatchOutcome {
        let selection = selection.trim();
        if selection.is_empty() {
            debug!("Ignoring click on {} with empty selection", menu_item_id);
            return DispatchOutcome::default();
        }

        match MenuAction::parse(menu_item_id) {
            Some(MenuAction::Service(service)) => self.lookup(&service, selection).await,
            Some(MenuAction::Combination(index)) => {
                let combinations = load_combinations(self.history.store()).await;
                match combinations.get(index) {
                    Some(combination) => self.run_combination(combination, selection).await,
                    None => {
                        warn!("No combination at index {}", index);
                        DispatchOutcome::default()
                    }
                }
            }
            None => {
                debug!("Ignoring unrecognised menu item {}", menu_item_id);
                DispatchOutcome::default()
            }
        }
    }

    /// Looks `indicator` up on one service and records it.
    pub async fn lookup(&mut self, service: &str, indicator: &str) -> DispatchOutcome {
        let Some(url) = find_service(service).and_then(|s| s.lookup_url(indicator)) else {
            warn!("Unknown service: {}", service);
            return DispatchOutcome::default();
        };

        let mut outcome = DispatchOutcome::default();
        self.open_into(&url, &mut outcome).await;
        self.record_into(indicator, service, &mut outcome).await;
        outcome
    }

    /// Opens one tab per known tool of `combination` and records a single
    /// entry under the combination's name.
    pub async fn run_combination(
        &mut self,
        combination: &Combination,
        indicator: &str,
    ) -> DispatchOutcome {
        debug!(
            "Running combination {} with tools {:?}",
            combination.name, combination.tools
        );

        let mut outcome = DispatchOutcome::default();
        for tool in &combination.tools {
            match find_service(tool).and_then(|s| s.lookup_url(indicator)) {
                Some(url) => self.open_into(&url, &mut outcome).await,
                None => warn!("Skipping unknown tool {} in {}", tool, combination.name),
            }
        }
        self.record_into(indicator, &combination.name, &mut outcome)
            .await;
        outcome
    }

    /// Re-opens the lookup for a stored record without recording it again.
    ///
    /// Returns the opened URL.
    ///
    /// # Errors
    ///
    /// - `DispatchError::UnknownService` if `tool` is not a known service.
    /// - `DispatchError::Tab` if the tab cannot be opened.
    pub async fn rerun(&self, indicator: &str, tool: &str) -> Result<String, DispatchError> {
        let url = find_service(tool)
            .and_then(|s| s.lookup_url(indicator))
            .ok_or_else(|| {
                error!("Unknown tool: {}", tool);
                DispatchError::UnknownService(tool.to_string())
            })?;

        self.opener.open(&url).await?;
        Ok(url)
    }

    async fn open_into(&self, url: &str, outcome: &mut DispatchOutcome) {
        match self.opener.open(url).await {
            Ok(()) => outcome.opened.push(url.to_string()),
            Err(e) => warn!("{}", e),
        }
    }

    async fn record_into(&mut self, indicator: &str, tool: &str, outcome: &mut DispatchOutcome) {
        match self.history.record(indicator, tool).await {
            Ok(record) => outcome.record = Some(record),
            Err(e) => {
                error!("Error saving to history: {}", e);
                outcome.history_problem = Some(e);
            }
        }
    }
}
