//! Which services appear in the context menu.

use super::catalog::{find_service, service_names};
use super::SettingsError;
use crate::store::{KeyValueStore, ENABLED_SERVICES_KEY};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Service-name to enabled-flag map, persisted under
/// [`ENABLED_SERVICES_KEY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnabledServices {
    flags: BTreeMap<String, bool>,
}

impl Default for EnabledServices {
    /// Every known service enabled.
    fn default() -> Self {
        Self {
            flags: service_names().map(|name| (name.to_string(), true)).collect(),
        }
    }
}

impl EnabledServices {
    /// Loads the settings from `store`.
    ///
    /// On first use nothing is stored yet: the defaults are written and
    /// returned. An unreadable or malformed value yields the defaults without
    /// touching the store.
    pub async fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(ENABLED_SERVICES_KEY).await {
            Ok(None) => {
                debug!("No enabled services stored, writing defaults");
                let defaults = Self::default();
                if let Err(e) = defaults.save(store).await {
                    warn!("Failed to store default enabled services: {}", e);
                }
                defaults
            }
            Ok(Some(value)) => match serde_json::from_value::<BTreeMap<String, bool>>(value) {
                Ok(flags) => Self { flags },
                Err(e) => {
                    warn!("Ignoring malformed enabled services: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Error loading enabled services: {}", e);
                Self::default()
            }
        }
    }

    /// Returns `true` if `service` is enabled. Services with no stored flag
    /// are disabled.
    pub fn is_enabled(&self, service: &str) -> bool {
        self.flags.get(service).copied().unwrap_or(false)
    }

    /// Enabled known services, in catalog order.
    pub fn enabled(&self) -> Vec<&'static str> {
        service_names()
            .filter(|name| self.is_enabled(name))
            .collect()
    }

    /// Enables or disables `service` and persists the change.
    ///
    /// # Errors
    ///
    /// - `SettingsError::UnknownService` if `service` is not in the catalog.
    /// - `SettingsError::Store` if the write fails; the in-memory flags are
    ///   left unchanged.
    pub async fn set_enabled<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        service: &str,
        enabled: bool,
    ) -> Result<(), SettingsError> {
        if find_service(service).is_none() {
            return Err(SettingsError::UnknownService(service.to_string()));
        }

        let mut updated = self.clone();
        updated.flags.insert(service.to_string(), enabled);
        updated.save(store).await?;
        *self = updated;
        Ok(())
    }

    /// Restores and persists the defaults.
    pub async fn reset_to_defaults<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<(), SettingsError> {
        let defaults = Self::default();
        defaults.save(store).await?;
        *self = defaults;
        Ok(())
    }

    async fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), SettingsError> {
        let value = serde_json::to_value(&self.flags)
            .map_err(|e| SettingsError::Store(e.into()))?;
        store.set(ENABLED_SERVICES_KEY, value).await?;
        Ok(())
    }
}
