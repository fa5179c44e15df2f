//! OSINT services, their enabled flags and user-defined combinations.

pub mod catalog;
pub mod combination;
pub mod settings;

pub use catalog::{
    encode_uri_component, find_service, lookup_url, service_names, ServiceDefinition, SERVICES,
};
pub use combination::{add_combination, delete_combination, load_combinations, Combination};
pub use settings::EnabledServices;

use crate::store::StoreError;
use std::fmt;

/// Errors from service settings and combination management.
#[derive(Debug)]
pub enum SettingsError {
    /// The named service is not in the catalog.
    UnknownService(String),

    /// A combination failed validation.
    InvalidCombination(String),

    /// No combination exists at the given index.
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of stored combinations
        len: usize,
    },

    /// The settings could not be read or written.
    Store(StoreError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownService(name) => write!(f, "Unknown service: {}", name),
            SettingsError::InvalidCombination(reason) => {
                write!(f, "Invalid combination: {}", reason)
            }
            SettingsError::IndexOutOfRange { index, len } => {
                write!(f, "No combination at index {} ({} stored)", index, len)
            }
            SettingsError::Store(err) => write!(f, "Settings store error: {}", err),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SettingsError {
    fn from(err: StoreError) -> Self {
        SettingsError::Store(err)
    }
}
