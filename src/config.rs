/// Tunable settings with their defaults
use serde::Deserialize;

pub const LAYOUT_MODE_KEY: &str = "chrome-winmgr-layout-mode";
pub const LEGACY_COLUMN_COUNT_KEY: &str = "chrome-winmgr-column-count";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay after the last keystroke before the search runs
    pub debounce_ms: u32,
    /// Maximum number of memoized search results per snapshot
    pub search_cache_capacity: usize,
    /// Extension page opened by the toolbar icon
    pub manager_page: String,
    /// Name of the runtime port views open to the background context
    pub view_port_name: String,
    pub layout_key: String,
    pub legacy_layout_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            debounce_ms: 150,
            search_cache_capacity: 50,
            manager_page: "window-manager.html".to_string(),
            view_port_name: "window-manager-view".to_string(),
            layout_key: LAYOUT_MODE_KEY.to_string(),
            legacy_layout_key: LEGACY_COLUMN_COUNT_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Layer a partial JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Settings, serde_json::Error> {
        serde_json::from_str(json)
    }
}
