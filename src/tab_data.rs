/// Data structures for windows and tabs
use serde::{Deserialize, Serialize};

/// Title shown for tabs the host reports without one
pub const UNTITLED: &str = "Untitled";

/// Kind of browser window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    #[default]
    Normal,
    Popup,
    Panel,
    App,
    Devtools,
    #[serde(other)]
    Other,
}

/// Visual state of a browser window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    Fullscreen,
    #[serde(rename = "locked-fullscreen")]
    LockedFullscreen,
    #[serde(other)]
    Other,
}

/// A browser tab as shown by the extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: i32,
    pub window_id: i32,
    pub title: String,
    pub url: String,
    pub fav_icon_url: Option<String>,
    pub active: bool,
    pub pinned: bool,
    pub index: i32,
}

impl Tab {
    pub fn new(id: i32, window_id: i32, title: &str, url: &str, index: i32) -> Tab {
        Tab {
            id,
            window_id,
            title: title.to_string(),
            url: url.to_string(),
            fav_icon_url: None,
            active: false,
            pinned: false,
            index,
        }
    }
}

/// A browser window with its tabs, in tab-strip order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: i32,
    pub kind: WindowKind,
    pub state: WindowState,
    pub focused: bool,
    pub incognito: bool,
    pub tabs: Vec<Tab>,
}

impl Window {
    pub fn new(id: i32, tabs: Vec<Tab>) -> Window {
        Window {
            id,
            kind: WindowKind::Normal,
            state: WindowState::Normal,
            focused: false,
            incognito: false,
            tabs,
        }
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.active)
    }
}

/// Tab as reported by `chrome.tabs` / `chrome.windows.getAll({ populate: true })`.
/// Every field is optional on the host side.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostTab {
    pub id: Option<i32>,
    pub window_id: Option<i32>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub fav_icon_url: Option<String>,
    pub active: Option<bool>,
    pub pinned: Option<bool>,
    pub index: Option<i32>,
}

impl HostTab {
    /// Fill in defaults for missing fields. Tabs without an id cannot be
    /// switched to or closed, so they are dropped.
    pub fn into_tab(self, window_id: i32, position: usize) -> Option<Tab> {
        let id = self.id?;

        Some(Tab {
            id,
            window_id: self.window_id.unwrap_or(window_id),
            title: self.title.unwrap_or_else(|| UNTITLED.to_string()),
            url: self.url.unwrap_or_default(),
            fav_icon_url: self.fav_icon_url.filter(|icon| !icon.is_empty()),
            active: self.active.unwrap_or(false),
            pinned: self.pinned.unwrap_or(false),
            index: self.index.unwrap_or(position as i32),
        })
    }
}

/// Window as reported by `chrome.windows.getAll({ populate: true })`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostWindow {
    pub id: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<WindowKind>,
    pub state: Option<WindowState>,
    pub focused: Option<bool>,
    pub incognito: Option<bool>,
    pub tabs: Option<Vec<HostTab>>,
}

impl HostWindow {
    pub fn into_window(self) -> Option<Window> {
        let id = self.id?;

        let tabs = self
            .tabs
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(position, tab)| tab.into_tab(id, position))
            .collect();

        Some(Window {
            id,
            kind: self.kind.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            focused: self.focused.unwrap_or(false),
            incognito: self.incognito.unwrap_or(false),
            tabs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_tab_defaults() {
        let host: HostTab = serde_json::from_str(r#"{"id": 7, "windowId": 1, "index": 0}"#).unwrap();
        let tab = host.into_tab(1, 0).unwrap();

        assert_eq!(tab.title, "Untitled");
        assert_eq!(tab.url, "");
        assert!(!tab.active);
        assert!(!tab.pinned);
        assert_eq!(tab.fav_icon_url, None);
    }

    #[test]
    fn test_host_tab_without_id_is_dropped() {
        let host: HostTab = serde_json::from_str(r#"{"title": "Ghost"}"#).unwrap();
        assert!(host.into_tab(1, 0).is_none());
    }

    #[test]
    fn test_host_window_parsing() {
        let json = r#"{
            "id": 3,
            "type": "popup",
            "state": "minimized",
            "focused": true,
            "incognito": true,
            "alwaysOnTop": false,
            "tabs": [
                {"id": 10, "windowId": 3, "title": "GitHub", "url": "https://github.com",
                 "favIconUrl": "https://github.com/favicon.ico", "active": true, "pinned": true, "index": 0}
            ]
        }"#;
        let window = serde_json::from_str::<HostWindow>(json).unwrap().into_window().unwrap();

        assert_eq!(window.id, 3);
        assert_eq!(window.kind, WindowKind::Popup);
        assert_eq!(window.state, WindowState::Minimized);
        assert!(window.focused);
        assert!(window.incognito);
        assert_eq!(window.tabs.len(), 1);
        assert_eq!(window.tabs[0].fav_icon_url.as_deref(), Some("https://github.com/favicon.ico"));
        assert_eq!(window.active_tab().map(|t| t.id), Some(10));
    }

    #[test]
    fn test_unknown_window_kind_and_missing_tabs() {
        let json = r#"{"id": 4, "type": "sidepanel", "state": "locked-fullscreen"}"#;
        let window = serde_json::from_str::<HostWindow>(json).unwrap().into_window().unwrap();

        assert_eq!(window.kind, WindowKind::Other);
        assert_eq!(window.state, WindowState::LockedFullscreen);
        assert!(window.tabs.is_empty());
        assert!(!window.focused);
    }

    #[test]
    fn test_missing_index_falls_back_to_position() {
        let host = HostWindow {
            id: Some(1),
            tabs: Some(vec![
                HostTab { id: Some(1), ..Default::default() },
                HostTab { id: Some(2), ..Default::default() },
            ]),
            ..Default::default()
        };
        let window = host.into_window().unwrap();

        assert_eq!(window.tabs[1].index, 1);
        assert_eq!(window.tabs[1].window_id, 1);
    }
}
