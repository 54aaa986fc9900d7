/// Shared hooks for the extension pages
use crate::debounce::Debouncer;
use crate::host::ChromeHost;
use crate::relay::ChangeMessage;
use crate::snapshot::fetch_windows;
use crate::tab_data::Window;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    fn connectToBackground(port_name: &str, callback: &Closure<dyn Fn(JsValue)>) -> JsValue;

    fn disconnectPort(port: &JsValue);
}

/// Snapshot state of a page plus a way to reload it
#[derive(Clone, PartialEq)]
pub struct WindowsData {
    pub windows: Rc<Vec<Window>>,
    pub loading: bool,
    pub error: Option<String>,
    pub refresh: Callback<()>,
}

#[derive(Clone)]
struct Loader {
    windows: UseStateHandle<Rc<Vec<Window>>>,
    loading: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
    latest: Rc<RefCell<Debouncer>>,
}

impl Loader {
    fn reload(&self) {
        let loader = self.clone();
        let ticket = loader.latest.borrow_mut().schedule();
        loader.loading.set(true);
        loader.error.set(None);

        spawn_local(async move {
            let fetched = fetch_windows(&ChromeHost).await;
            // A newer reload started while this one was in flight
            if !loader.latest.borrow().is_current(ticket) {
                return;
            }
            match fetched {
                Ok(windows) => {
                    loader.windows.set(Rc::new(windows));
                }
                Err(e) => {
                    log::warn!("{}", e);
                    loader.windows.set(Rc::new(Vec::new()));
                    loader.error.set(Some(e.to_string()));
                }
            }
            loader.loading.set(false);
        });
    }
}

/// Load windows on mount, and again whenever the background context reports
/// a window or tab change
#[hook]
pub fn use_windows_data(port_name: String) -> WindowsData {
    let loader = Loader {
        windows: use_state(|| Rc::new(Vec::<Window>::new())),
        loading: use_state(|| true),
        error: use_state(|| None::<String>),
        latest: use_mut_ref(Debouncer::new),
    };

    {
        let loader = loader.clone();
        use_effect_with(port_name, move |port_name| {
            loader.reload();

            let on_change = Closure::<dyn Fn(JsValue)>::new(move |message: JsValue| {
                match serde_wasm_bindgen::from_value::<ChangeMessage>(message) {
                    Ok(change) => {
                        log::debug!("Reloading after {:?}", change.event_type);
                        loader.reload();
                    }
                    Err(e) => log::debug!("Ignoring message from background: {}", e),
                }
            });
            let port = connectToBackground(port_name, &on_change);

            move || {
                disconnectPort(&port);
                drop(on_change);
            }
        });
    }

    let refresh = {
        let loader = loader.clone();
        Callback::from(move |_: ()| loader.reload())
    };

    WindowsData {
        windows: (*loader.windows).clone(),
        loading: *loader.loading,
        error: (*loader.error).clone(),
        refresh,
    }
}
