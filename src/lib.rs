/// Window Manager - Chrome Extension for browsing windows and tabs
/// Built with Rust + WASM + Yew

mod actions;
mod background;
mod config;
mod debounce;
mod display;
mod errors;
mod host;
mod layout;
mod relay;
mod search;
mod snapshot;
mod storage;
mod tab_data;
pub mod ui;

pub use config::Settings;
pub use errors::{FetchError, HostError, MutationError, NotifyDeliveryError, StorageError};
pub use layout::{LayoutMode, load_layout, migrate_legacy, save_layout};
pub use search::{SearchIndex, TabSearch, filter_windows};
pub use storage::{LocalStorage, PreferenceStore};
pub use tab_data::{Tab, Window};

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Defaults, optionally overridden by a JSON object from the page
fn settings_from(json: Option<String>) -> Settings {
    match json.as_deref().map(Settings::from_json) {
        Some(Ok(settings)) => settings,
        Some(Err(e)) => {
            log::warn!("Invalid settings, using defaults: {}", e);
            Settings::default()
        }
        None => Settings::default(),
    }
}

// Start the Yew app for the full-page window manager
#[wasm_bindgen]
pub fn start_window_manager(settings_json: Option<String>) {
    let props = ui::manager::WindowManagerProps {
        settings: settings_from(settings_json),
    };
    yew::Renderer::<ui::manager::WindowManagerApp>::with_props(props).render();
}

// Start the Yew app for the toolbar popup
#[wasm_bindgen]
pub fn start_popup(settings_json: Option<String>) {
    let props = ui::popup::PopupProps {
        settings: settings_from(settings_json),
    };
    yew::Renderer::<ui::popup::PopupApp>::with_props(props).render();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsApp>::new().render();
}

// Register the background listeners (service worker)
#[wasm_bindgen]
pub fn start_background(settings_json: Option<String>) {
    background::start(settings_from(settings_json));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_json() {
        assert_eq!(settings_from(None), Settings::default());
        assert_eq!(settings_from(Some(r#"{"debounce_ms": 50}"#.to_string())).debounce_ms, 50);
        assert_eq!(settings_from(Some("not json".to_string())), Settings::default());
    }
}
