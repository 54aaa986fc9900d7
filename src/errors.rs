/// Error types for host calls, tab actions, relaying and preference storage
use wasm_bindgen::{JsCast, JsValue};

/// A bridge call into the `chrome.*` APIs failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response from host: {0}")]
    Decode(String),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        HostError::Rejected(js_message(&value))
    }
}

impl From<serde_wasm_bindgen::Error> for HostError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        HostError::Decode(err.to_string())
    }
}

/// Reading the window/tab snapshot failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to load windows: {source}")]
pub struct FetchError {
    #[from]
    pub source: HostError,
}

/// A user-initiated tab action failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationError {
    #[error("Failed to switch to tab {tab_id}: {source}")]
    Switch { tab_id: i32, source: HostError },

    #[error("Failed to close tab {tab_id}: {source}")]
    Close { tab_id: i32, source: HostError },

    #[error("Failed to open the window manager: {source}")]
    OpenManager { source: HostError },
}

/// One view could not receive a change message. Never surfaced to callers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Could not deliver to {receiver}: {message}")]
pub struct NotifyDeliveryError {
    pub receiver: String,
    pub message: String,
}

/// Local preference storage is unavailable or a call threw
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Local storage is not available")]
    Unavailable,

    #[error("Storage call failed: {0}")]
    Failed(String),
}

impl From<JsValue> for StorageError {
    fn from(value: JsValue) -> Self {
        StorageError::Failed(js_message(&value))
    }
}

/// Best-effort human message for a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message() {
        let err = FetchError::from(HostError::Rejected("No windows API".to_string()));
        assert_eq!(err.to_string(), "Failed to load windows: No windows API");
    }

    #[test]
    fn test_mutation_error_message() {
        let err = MutationError::Close {
            tab_id: 42,
            source: HostError::Rejected("No tab with id: 42.".to_string()),
        };
        assert_eq!(err.to_string(), "Failed to close tab 42: No tab with id: 42.");
    }
}
