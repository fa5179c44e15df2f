//! Configuration loading.
//!
//! Settings are read from the "ioc-lookup" key of a JSON settings document,
//! merged with defaults and validated. The resulting value is handed to the
//! components that need it; there is no process-wide configuration state.

pub mod schema;

pub use schema::ExtensionConfig;

use log::warn;
use serde_json::Value;

/// Key under which settings live in a settings document.
pub const SETTINGS_KEY: &str = "ioc-lookup";

/// Loads configuration from an optional settings document.
///
/// Unparseable settings fall back to defaults with a warning; settings that
/// parse but fail validation are an error.
///
/// # Example
///
/// ```
/// use ioc_lookup::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({ "ioc-lookup": { "recentLimit": 8 } });
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.recent_limit, 8);
/// assert_eq!(config.history_limit, 100);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ExtensionConfig, String> {
    let mut config = ExtensionConfig::default();

    if let Some(settings) = settings_json {
        if let Some(section) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<ExtensionConfig>(section.clone()) {
                Ok(user_config) => {
                    config = config.merge(&user_config);
                }
                Err(e) => {
                    warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY, e
                    );
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    Ok(config)
}
