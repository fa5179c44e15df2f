//! User-defined combinations: a named group of services dispatched together.

use super::catalog::find_service;
use super::SettingsError;
use crate::store::{KeyValueStore, COMBINATIONS_KEY};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimum number of tools a combination must contain.
pub const MIN_COMBINATION_TOOLS: usize = 2;

/// A named group of services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    /// Menu label, also recorded as the history `tool`.
    pub name: String,
    /// Service names, in dispatch order.
    pub tools: Vec<String>,
}

impl Combination {
    /// Creates a validated combination.
    ///
    /// # Errors
    ///
    /// - `SettingsError::InvalidCombination` if the trimmed name is empty or
    ///   fewer than two tools are given.
    /// - `SettingsError::UnknownService` if a tool is not in the catalog.
    pub fn new(name: &str, tools: Vec<String>) -> Result<Self, SettingsError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SettingsError::InvalidCombination(
                "name must not be empty".to_string(),
            ));
        }

        if tools.len() < MIN_COMBINATION_TOOLS {
            return Err(SettingsError::InvalidCombination(format!(
                "at least {} tools are required",
                MIN_COMBINATION_TOOLS
            )));
        }

        if let Some(unknown) = tools.iter().find(|tool| find_service(tool).is_none()) {
            return Err(SettingsError::UnknownService(unknown.clone()));
        }

        Ok(Self {
            name: name.to_string(),
            tools,
        })
    }
}

/// Loads the stored combinations.
///
/// Read failures and malformed values yield an empty list.
pub async fn load_combinations<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Combination> {
    match read_combinations(store).await {
        Ok(combinations) => combinations,
        Err(e) => {
            warn!("Error loading custom combinations: {}", e);
            Vec::new()
        }
    }
}

/// Appends `combination` to the stored list and returns the new list.
///
/// # Errors
///
/// Returns `SettingsError::Store` if the list cannot be read or written.
pub async fn add_combination<S: KeyValueStore + ?Sized>(
    store: &S,
    combination: Combination,
) -> Result<Vec<Combination>, SettingsError> {
    let mut combinations = read_combinations(store).await?;
    combinations.push(combination);
    write_combinations(store, &combinations).await?;
    Ok(combinations)
}

/// Deletes the combination at `index` and returns the new list.
///
/// # Errors
///
/// - `SettingsError::IndexOutOfRange` if there is no combination at `index`.
/// - `SettingsError::Store` if the list cannot be read or written.
pub async fn delete_combination<S: KeyValueStore + ?Sized>(
    store: &S,
    index: usize,
) -> Result<Vec<Combination>, SettingsError> {
    let mut combinations = read_combinations(store).await?;
    if index >= combinations.len() {
        return Err(SettingsError::IndexOutOfRange {
            index,
            len: combinations.len(),
        });
    }
    combinations.remove(index);
    write_combinations(store, &combinations).await?;
    Ok(combinations)
}

async fn read_combinations<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Vec<Combination>, SettingsError> {
    match store.get(COMBINATIONS_KEY).await? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => {
            serde_json::from_value(value).map_err(|e| SettingsError::Store(e.into()))
        }
    }
}

async fn write_combinations<S: KeyValueStore + ?Sized>(
    store: &S,
    combinations: &[Combination],
) -> Result<(), SettingsError> {
    let value = serde_json::to_value(combinations).map_err(|e| SettingsError::Store(e.into()))?;
    store.set(COMBINATIONS_KEY, value).await?;
    Ok(())
}
