//! Tab-opening seam.

use async_trait::async_trait;
use std::fmt;
use std::sync::Mutex;

/// Opens a fully-formed URL in a new browsing context.
#[async_trait]
pub trait TabOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<(), TabError>;
}

/// The host refused or failed to open a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabError(pub String);

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to open tab: {}", self.0)
    }
}

impl std::error::Error for TabError {}

/// A [`TabOpener`] that only remembers the URLs it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingTabOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingTabOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs opened so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TabOpener for RecordingTabOpener {
    async fn open(&self, url: &str) -> Result<(), TabError> {
        self.opened
            .lock()
            .map_err(|_| TabError("recording opener lock poisoned".to_string()))?
            .push(url.to_string());
        Ok(())
    }
}
