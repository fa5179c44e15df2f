//! Context-menu model.
//!
//! The host turns these entries into real menu items; clicks come back as
//! the entry id, which [`MenuAction::parse`] decodes.

use crate::services::{Combination, EnabledServices};

/// Id of the top-level menu entry.
pub const PARENT_MENU_ID: &str = "soc-osint-parent";

/// Title of the top-level menu entry.
pub const PARENT_MENU_TITLE: &str = "SOC OSINT Search";

/// Id of the separator between combinations and single services.
pub const SEPARATOR_ID: &str = "separator-1";

const SERVICE_PREFIX: &str = "search-";
const COMBINATION_PREFIX: &str = "combo-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntryKind {
    Normal,
    Separator,
}

/// One item of the selection context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub kind: MenuEntryKind,
}

impl MenuEntry {
    fn child(id: String, title: String) -> Self {
        Self {
            id,
            parent_id: Some(PARENT_MENU_ID.to_string()),
            title,
            kind: MenuEntryKind::Normal,
        }
    }
}

/// What a clicked menu entry asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Look the selection up on one service.
    Service(String),
    /// Run the stored combination at this index.
    Combination(usize),
}

impl MenuAction {
    /// Decodes a menu entry id. Unrecognised ids return `None`.
    pub fn parse(menu_item_id: &str) -> Option<Self> {
        if let Some(service) = menu_item_id.strip_prefix(SERVICE_PREFIX) {
            return Some(MenuAction::Service(service.to_string()));
        }

        menu_item_id
            .strip_prefix(COMBINATION_PREFIX)
            .and_then(|index| index.parse().ok())
            .map(MenuAction::Combination)
    }

    /// The menu entry id for this action.
    pub fn menu_id(&self) -> String {
        match self {
            MenuAction::Service(name) => format!("{}{}", SERVICE_PREFIX, name),
            MenuAction::Combination(index) => format!("{}{}", COMBINATION_PREFIX, index),
        }
    }
}

/// Builds the full menu: parent, combinations, separator, enabled services.
pub fn build_menu(services: &EnabledServices, combinations: &[Combination]) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry {
        id: PARENT_MENU_ID.to_string(),
        parent_id: None,
        title: PARENT_MENU_TITLE.to_string(),
        kind: MenuEntryKind::Normal,
    }];

    for (index, combination) in combinations.iter().enumerate() {
        entries.push(MenuEntry::child(
            MenuAction::Combination(index).menu_id(),
            format!("⚡ {}", combination.name),
        ));
    }

    if !combinations.is_empty() {
        entries.push(MenuEntry {
            id: SEPARATOR_ID.to_string(),
            parent_id: Some(PARENT_MENU_ID.to_string()),
            title: String::new(),
            kind: MenuEntryKind::Separator,
        });
    }

    for service in services.enabled() {
        entries.push(MenuEntry::child(
            MenuAction::Service(service.to_string()).menu_id(),
            service.to_string(),
        ));
    }

    entries
}
