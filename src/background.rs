/// Background context: relays lifecycle events to open views and handles
/// the toolbar icon
use crate::actions::open_or_focus_manager;
use crate::config::Settings;
use crate::errors::{NotifyDeliveryError, js_message};
use crate::host::ChromeHost;
use crate::relay::{ChangeMessage, HostEvent, ViewReceiver, ViewRegistry, classify};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    fn subscribeLifecycle(callback: &Closure<dyn Fn(String, JsValue)>);

    fn onViewConnect(port_name: &str, callback: &Closure<dyn Fn(JsValue)>);

    fn onPortDisconnect(port: &JsValue, callback: &JsValue);

    #[wasm_bindgen(catch)]
    fn postToPort(port: &JsValue, message: JsValue) -> Result<(), JsValue>;

    fn onInstalled(callback: &Closure<dyn Fn()>);

    fn onActionClicked(callback: &Closure<dyn Fn()>);
}

/// A connected view, reached through its runtime port
pub struct ViewPort {
    id: u32,
    port: JsValue,
}

impl ViewReceiver for ViewPort {
    fn label(&self) -> String {
        format!("view-{}", self.id)
    }

    fn deliver(&self, message: &ChangeMessage) -> Result<(), NotifyDeliveryError> {
        let fail = |message: String| NotifyDeliveryError {
            receiver: self.label(),
            message,
        };

        let message_js = message
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| fail(e.to_string()))?;
        postToPort(&self.port, message_js).map_err(|e| fail(js_message(&e)))
    }
}

type Registry = Rc<RefCell<ViewRegistry<ViewPort>>>;

/// Register `view` and forget it again once its port disconnects. The
/// disconnect callback runs at most once and is freed after it runs.
fn track_view(registry: &Registry, view: ViewPort) {
    let port = view.port.clone();
    let label = view.label();
    registry.borrow_mut().connect(view);
    log::debug!("{} view(s) connected", registry.borrow().len());

    let registry = registry.clone();
    let on_disconnect = Closure::once_into_js(move || {
        registry.borrow_mut().disconnect(&label);
        log::debug!("{} disconnected, {} view(s) left", label, registry.borrow().len());
    });
    onPortDisconnect(&port, &on_disconnect);
}

/// Wire up the background listeners. They live as long as the extension,
/// so their closures are leaked on purpose.
pub fn start(settings: Settings) {
    let registry: Registry = Rc::new(RefCell::new(ViewRegistry::new()));
    let next_id = Rc::new(Cell::new(0u32));

    let on_installed = Closure::<dyn Fn()>::new(|| {
        log::info!("Window manager installed");
    });
    onInstalled(&on_installed);
    on_installed.forget();

    let on_connect = {
        let registry = registry.clone();
        Closure::<dyn Fn(JsValue)>::new(move |port: JsValue| {
            let id = next_id.get();
            next_id.set(id.wrapping_add(1));

            track_view(&registry, ViewPort { id, port });
        })
    };
    onViewConnect(&settings.view_port_name, &on_connect);
    on_connect.forget();

    let on_lifecycle = {
        let registry = registry.clone();
        Closure::<dyn Fn(String, JsValue)>::new(move |name: String, details: JsValue| {
            let details = serde_wasm_bindgen::from_value(details).unwrap_or(serde_json::Value::Null);
            let event = match HostEvent::from_parts(&name, details) {
                Ok(event) => event,
                Err(e) => {
                    log::warn!("Ignoring lifecycle event: {}", e);
                    return;
                }
            };
            let Some(message) = classify(&event) else {
                return;
            };
            if registry.borrow().is_empty() {
                log::debug!("{:?}: no views open", message.event_type);
                return;
            }
            let deliveries = registry.borrow_mut().broadcast(&message);
            log::debug!(
                "{:?} relayed to {}/{} views",
                message.event_type,
                deliveries.iter().filter(|d| d.is_delivered()).count(),
                deliveries.len()
            );
            for dropped in deliveries.iter().filter(|d| !d.is_delivered()) {
                log::debug!("Dropped unreachable {}", dropped.receiver);
            }
        })
    };
    subscribeLifecycle(&on_lifecycle);
    on_lifecycle.forget();

    let manager_url = ChromeHost::extension_url(&settings.manager_page);
    let on_action = Closure::<dyn Fn()>::new(move || {
        let manager_url = manager_url.clone();
        spawn_local(async move {
            if let Err(e) = open_or_focus_manager(&ChromeHost, &manager_url).await {
                log::error!("Error opening window manager: {}", e);
            }
        });
    });
    onActionClicked(&on_action);
    on_action.forget();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use js_sys::Function;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Minimal stand-in for a `chrome.runtime.Port`
    fn fake_port() -> JsValue {
        Function::new_no_args(
            "const listeners = []; \
             return { listeners, postMessage() {}, onDisconnect: { addListener: (f) => listeners.push(f) } };",
        )
        .call0(&JsValue::NULL)
        .unwrap()
    }

    fn fire_disconnect(port: &JsValue) {
        Function::new_with_args("port", "port.listeners.forEach((f) => f());")
            .call1(&JsValue::NULL, port)
            .unwrap();
    }

    #[wasm_bindgen_test]
    fn test_disconnect_removes_view() {
        let registry: Registry = Rc::new(RefCell::new(ViewRegistry::new()));
        let first = fake_port();
        let second = fake_port();
        track_view(&registry, ViewPort { id: 1, port: first.clone() });
        track_view(&registry, ViewPort { id: 2, port: second });
        assert_eq!(registry.borrow().len(), 2);

        fire_disconnect(&first);

        assert_eq!(registry.borrow().len(), 1);
        assert_eq!(Rc::strong_count(&registry), 2);
    }
}
