//! Configuration schema for the IoC lookup core.
//!
//! This module defines the configuration structure and validation logic for
//! the user-configurable settings.

use crate::history::MAX_HISTORY_ENTRIES;
use serde::{Deserialize, Serialize};

/// Main configuration structure.
///
/// All settings can be supplied under the "ioc-lookup" key of a settings
/// document. Missing settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfig {
    /// Maximum number of lookups kept in history.
    ///
    /// Defaults to 100, which is also the hard upper bound.
    ///
    /// Must be between 1 and 100.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Number of recent lookups shown in the popup. Defaults to 5.
    ///
    /// Must be > 0.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl ExtensionConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_ENTRIES {
            return Err(format!(
                "historyLimit must be between 1 and {}",
                MAX_HISTORY_ENTRIES
            ));
        }

        if self.recent_limit == 0 {
            return Err("recentLimit must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Merges this configuration with another, using values from `other`.
    pub fn merge(&self, other: &ExtensionConfig) -> Self {
        Self {
            history_limit: other.history_limit,
            recent_limit: other.recent_limit,
        }
    }
}

// Default value functions for serde

fn default_history_limit() -> usize {
    MAX_HISTORY_ENTRIES
}

fn default_recent_limit() -> usize {
    5
}
