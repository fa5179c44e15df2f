//! IoC lookup command-line adapter
//!
//! Drives the lookup core from a terminal against a JSON-file store. "Opening
//! a tab" prints the lookup URL to stdout.
//!
//! # Usage
//!
//! ```text
//! ioc-lookup classify <text>
//! ioc-lookup lookup <service> <text>
//! ioc-lookup combo <index> <text>
//! ioc-lookup rerun <service> <text>
//! ioc-lookup history [ip|hash|domain|url|unknown]
//! ioc-lookup recent
//! ioc-lookup stats
//! ioc-lookup menu
//! ioc-lookup clear
//! ```
//!
//! `IOC_LOOKUP_STORE` overrides the store file, `IOC_LOOKUP_SETTINGS` points
//! at a JSON settings document. Logging is controlled with `RUST_LOG`.

use async_trait::async_trait;
use ioc_lookup::config::{load_config, ExtensionConfig};
use ioc_lookup::dispatch::{Dispatcher, MenuEntryKind, TabError, TabOpener};
use ioc_lookup::history::{
    format_history_entry_relative, format_history_list, format_stats, recent, HistoryConfig,
    HistoryLog,
};
use ioc_lookup::store::JsonFileStore;
use ioc_lookup::{classify, IndicatorType};
use std::process::ExitCode;

struct PrintingTabOpener;

#[async_trait]
impl TabOpener for PrintingTabOpener {
    async fn open(&self, url: &str) -> Result<(), TabError> {
        println!("{}", url);
        Ok(())
    }
}

const USAGE: &str = "usage: ioc-lookup <classify|lookup|combo|rerun|history|recent|stats|menu|clear> [args]";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("[ioc-lookup] {}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<(), String> {
    let (command, rest) = args.split_first().ok_or_else(|| USAGE.to_string())?;

    if command == "classify" {
        let text = rest.join(" ");
        println!("{}", classify(text.trim()));
        return Ok(());
    }

    let config = settings()?;
    let store = match std::env::var_os("IOC_LOOKUP_STORE") {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::open_default().map_err(|e| e.to_string())?,
    };
    log::debug!("Using store at {}", store.path().display());

    let history = HistoryLog::with_config(store, HistoryConfig::from_config(&config));
    let mut dispatcher = Dispatcher::new(history, PrintingTabOpener);

    match (command.as_str(), rest) {
        ("lookup", [service, text @ ..]) if !text.is_empty() => {
            let outcome = dispatcher.lookup(service, text.join(" ").trim()).await;
            if outcome.is_ignored() {
                return Err(format!("Unknown service: {}", service));
            }
            report_history_problem(outcome.history_problem)
        }
        ("combo", [index, text @ ..]) if !text.is_empty() => {
            let menu_id = format!("combo-{}", index);
            let outcome = dispatcher.handle_click(&menu_id, &text.join(" ")).await;
            if outcome.is_ignored() {
                return Err(format!("No combination at index {}", index));
            }
            report_history_problem(outcome.history_problem)
        }
        ("rerun", [service, text @ ..]) if !text.is_empty() => dispatcher
            .rerun(text.join(" ").trim(), service)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string()),
        ("history", filter) => {
            let filter = match filter.first() {
                Some(kind) if kind != "all" => Some(kind.parse::<IndicatorType>()?),
                _ => None,
            };
            let listing = dispatcher.history_mut().list(filter).await;
            if let Some(problem) = &listing.problem {
                eprintln!("[ioc-lookup] warning: {}", problem);
            }
            if listing.records.is_empty() {
                println!("No analysis history found");
            }
            for line in format_history_list(&listing.records) {
                println!("{}", line);
            }
            Ok(())
        }
        ("recent", []) => {
            let listing = dispatcher.history_mut().list(None).await;
            if listing.records.is_empty() {
                println!("No recent analysis");
            }
            let now = chrono::Utc::now();
            for record in recent(&listing.records, config.recent_limit) {
                println!("{}", format_history_entry_relative(record, &now));
            }
            Ok(())
        }
        ("stats", []) => {
            let stats = dispatcher.history_mut().aggregate().await;
            print!("{}", format_stats(&stats));
            Ok(())
        }
        ("menu", []) => {
            for entry in dispatcher.menu().await {
                match entry.kind {
                    MenuEntryKind::Separator => println!("  ----"),
                    MenuEntryKind::Normal if entry.parent_id.is_none() => println!("{}", entry.title),
                    MenuEntryKind::Normal => println!("  {:<28} {}", entry.id, entry.title),
                }
            }
            Ok(())
        }
        ("clear", []) => dispatcher
            .history_mut()
            .clear()
            .await
            .map_err(|e| e.to_string()),
        _ => Err(USAGE.to_string()),
    }
}

fn settings() -> Result<ExtensionConfig, String> {
    let Some(path) = std::env::var_os("IOC_LOOKUP_SETTINGS") else {
        return load_config(None);
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read settings {}: {}", path.to_string_lossy(), e))?;
    let json = serde_json::from_str(&content).map_err(|e| format!("Invalid settings: {}", e))?;
    load_config(Some(json))
}

fn report_history_problem(problem: Option<ioc_lookup::HistoryError>) -> Result<(), String> {
    match problem {
        Some(err) => Err(err.to_string()),
        None => Ok(()),
    }
}
