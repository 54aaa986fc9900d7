/// Access to the browser's window and tab APIs through the JS bridge
use crate::errors::HostError;
use crate::tab_data::{HostTab, HostWindow};
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getAllWindows() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn updateTabActive(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn focusWindow(window_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabsByUrl(url: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<(), JsValue>;

    fn getExtensionUrl(path: &str) -> String;
}

/// The subset of the host tab/window API this extension uses.
/// Calls are asynchronous and are awaited one at a time by callers.
#[allow(async_fn_in_trait)]
pub trait TabHost {
    async fn all_windows(&self) -> Result<Vec<HostWindow>, HostError>;
    async fn activate_tab(&self, tab_id: i32) -> Result<(), HostError>;
    async fn get_tab(&self, tab_id: i32) -> Result<HostTab, HostError>;
    async fn focus_window(&self, window_id: i32) -> Result<(), HostError>;
    async fn remove_tab(&self, tab_id: i32) -> Result<(), HostError>;
    async fn query_tabs_by_url(&self, url: &str) -> Result<Vec<HostTab>, HostError>;
    async fn create_tab(&self, url: &str) -> Result<(), HostError>;
}

/// `TabHost` backed by `chrome.tabs` and `chrome.windows`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChromeHost;

impl ChromeHost {
    /// Absolute URL of a page bundled with the extension
    pub fn extension_url(path: &str) -> String {
        getExtensionUrl(path)
    }
}

impl TabHost for ChromeHost {
    async fn all_windows(&self) -> Result<Vec<HostWindow>, HostError> {
        let windows_js = getAllWindows().await?;
        Ok(serde_wasm_bindgen::from_value(windows_js)?)
    }

    async fn activate_tab(&self, tab_id: i32) -> Result<(), HostError> {
        Ok(updateTabActive(tab_id).await?)
    }

    async fn get_tab(&self, tab_id: i32) -> Result<HostTab, HostError> {
        let tab_js = getTab(tab_id).await?;
        Ok(serde_wasm_bindgen::from_value(tab_js)?)
    }

    async fn focus_window(&self, window_id: i32) -> Result<(), HostError> {
        Ok(focusWindow(window_id).await?)
    }

    async fn remove_tab(&self, tab_id: i32) -> Result<(), HostError> {
        Ok(removeTab(tab_id).await?)
    }

    async fn query_tabs_by_url(&self, url: &str) -> Result<Vec<HostTab>, HostError> {
        let tabs_js = queryTabsByUrl(url).await?;
        Ok(serde_wasm_bindgen::from_value(tabs_js)?)
    }

    async fn create_tab(&self, url: &str) -> Result<(), HostError> {
        Ok(createTab(url).await?)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory host used by unit tests
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct FakeHost {
        pub windows: RefCell<Vec<HostWindow>>,
        pub fail_with: RefCell<Option<String>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeHost {
        pub fn with_windows(windows: Vec<HostWindow>) -> FakeHost {
            FakeHost {
                windows: RefCell::new(windows),
                ..Default::default()
            }
        }

        pub fn failing(message: &str) -> FakeHost {
            FakeHost {
                fail_with: RefCell::new(Some(message.to_string())),
                ..Default::default()
            }
        }

        fn record(&self, call: String) -> Result<(), HostError> {
            self.calls.borrow_mut().push(call);
            match &*self.fail_with.borrow() {
                Some(message) => Err(HostError::Rejected(message.clone())),
                None => Ok(()),
            }
        }

        fn all_tabs(&self) -> Vec<HostTab> {
            self.windows
                .borrow()
                .iter()
                .flat_map(|w| w.tabs.clone().unwrap_or_default())
                .collect()
        }
    }

    impl TabHost for FakeHost {
        async fn all_windows(&self) -> Result<Vec<HostWindow>, HostError> {
            self.record("all_windows".to_string())?;
            Ok(self.windows.borrow().clone())
        }

        async fn activate_tab(&self, tab_id: i32) -> Result<(), HostError> {
            self.record(format!("activate_tab {}", tab_id))
        }

        async fn get_tab(&self, tab_id: i32) -> Result<HostTab, HostError> {
            self.record(format!("get_tab {}", tab_id))?;
            self.all_tabs()
                .into_iter()
                .find(|t| t.id == Some(tab_id))
                .ok_or_else(|| HostError::Rejected(format!("No tab with id: {}.", tab_id)))
        }

        async fn focus_window(&self, window_id: i32) -> Result<(), HostError> {
            self.record(format!("focus_window {}", window_id))
        }

        async fn remove_tab(&self, tab_id: i32) -> Result<(), HostError> {
            self.record(format!("remove_tab {}", tab_id))
        }

        async fn query_tabs_by_url(&self, url: &str) -> Result<Vec<HostTab>, HostError> {
            self.record(format!("query_tabs_by_url {}", url))?;
            Ok(self
                .all_tabs()
                .into_iter()
                .filter(|t| t.url.as_deref() == Some(url))
                .collect())
        }

        async fn create_tab(&self, url: &str) -> Result<(), HostError> {
            self.record(format!("create_tab {}", url))
        }
    }
}
