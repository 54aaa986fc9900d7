/// Layout modes for the window grid and their persisted preference
use crate::config::Settings;
use crate::errors::StorageError;
use crate::storage::PreferenceStore;

pub const MAX_COLUMNS: u8 = 6;

/// How window cards are arranged: by card size, or in a fixed number of columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    Compact,
    #[default]
    Medium,
    Large,
    Columns(u8),
}

impl LayoutMode {
    /// Every selectable mode with its label, in menu order
    pub const OPTIONS: [(LayoutMode, &'static str); 9] = [
        (LayoutMode::Compact, "Compact Cards"),
        (LayoutMode::Medium, "Medium Cards"),
        (LayoutMode::Large, "Large Cards"),
        (LayoutMode::Columns(1), "1 Column"),
        (LayoutMode::Columns(2), "2 Columns"),
        (LayoutMode::Columns(3), "3 Columns"),
        (LayoutMode::Columns(4), "4 Columns"),
        (LayoutMode::Columns(5), "5 Columns"),
        (LayoutMode::Columns(6), "6 Columns"),
    ];

    /// Map a stored preference to a mode. Anything unrecognized is `Medium`.
    pub fn resolve(preference: Option<&str>) -> LayoutMode {
        let Some(value) = preference.map(str::trim) else {
            return LayoutMode::Medium;
        };

        match value {
            "compact" => LayoutMode::Compact,
            "medium" => LayoutMode::Medium,
            "large" => LayoutMode::Large,
            other => match other.parse::<u8>() {
                Ok(n) if (1..=MAX_COLUMNS).contains(&n) => LayoutMode::Columns(n),
                _ => LayoutMode::Medium,
            },
        }
    }

    /// Value written to storage for this mode
    pub fn preference(&self) -> String {
        match self {
            LayoutMode::Compact => "compact".to_string(),
            LayoutMode::Medium => "medium".to_string(),
            LayoutMode::Large => "large".to_string(),
            LayoutMode::Columns(n) => n.to_string(),
        }
    }

    pub fn container_class(&self) -> &'static str {
        match self {
            LayoutMode::Compact => "masonry-container-compact",
            LayoutMode::Medium => "masonry-container-medium",
            LayoutMode::Large => "masonry-container-large",
            LayoutMode::Columns(_) => "masonry-container-custom",
        }
    }

    pub fn column_count(&self) -> Option<u8> {
        match self {
            LayoutMode::Columns(n) => Some(*n),
            _ => None,
        }
    }
}

/// Carry a legacy column-count preference over to the layout-mode key.
///
/// Runs only when the layout-mode key is unset and the legacy key exists.
/// Legacy `0` ("auto") becomes `medium`; other integers are kept as the
/// column count. Returns the migrated value, if any.
pub fn migrate_legacy<S: PreferenceStore>(store: &S, settings: &Settings) -> Result<Option<String>, StorageError> {
    if store.get(&settings.layout_key)?.is_some() {
        return Ok(None);
    }
    let Some(legacy) = store.get(&settings.legacy_layout_key)? else {
        return Ok(None);
    };

    let migrated = match legacy.trim().parse::<i64>() {
        Ok(0) | Err(_) => LayoutMode::Medium.preference(),
        Ok(columns) => columns.to_string(),
    };

    store.set(&settings.layout_key, &migrated)?;
    store.remove(&settings.legacy_layout_key)?;
    log::info!("Migrated legacy column count {:?} to layout mode {:?}", legacy, migrated);

    Ok(Some(migrated))
}

/// Layout to use at startup. Storage failures fall back to `Medium`.
pub fn load_layout<S: PreferenceStore>(store: &S, settings: &Settings) -> LayoutMode {
    let stored = migrate_legacy(store, settings).and_then(|_| store.get(&settings.layout_key));

    match stored {
        Ok(value) => LayoutMode::resolve(value.as_deref()),
        Err(e) => {
            log::warn!("Could not read layout preference: {}", e);
            LayoutMode::Medium
        }
    }
}

/// Persist a user-selected layout; failures are logged and ignored
pub fn save_layout<S: PreferenceStore>(store: &S, settings: &Settings, mode: LayoutMode) {
    if let Err(e) = store.set(&settings.layout_key, &mode.preference()) {
        log::warn!("Could not save layout preference: {}", e);
    }
}
