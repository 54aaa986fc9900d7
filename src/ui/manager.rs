/// Full-page window manager: search, layout selection, masonry grid

use crate::config::Settings;
use crate::debounce::Debouncer;
use crate::layout::{LayoutMode, load_layout, save_layout};
use crate::search::{SearchResult, TabSearch};
use crate::snapshot::count_tabs;
use crate::storage::LocalStorage;
use crate::tab_data::Window;
use crate::ui::components::{ActionError, WindowCard};
use crate::ui::hooks::use_windows_data;
use patternfly_yew::prelude::*;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::time::sleep;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WindowManagerProps {
    #[prop_or_default]
    pub settings: Settings,
}

/// Search engine bound to the snapshot it was last fed
struct SnapshotSearch {
    snapshot: Rc<Vec<Window>>,
    engine: TabSearch,
}

impl SnapshotSearch {
    fn new(cache_capacity: usize) -> Self {
        SnapshotSearch {
            snapshot: Rc::new(Vec::new()),
            engine: TabSearch::new(cache_capacity),
        }
    }

    fn search(&mut self, snapshot: &Rc<Vec<Window>>, query: &str) -> SearchResult {
        if !Rc::ptr_eq(&self.snapshot, snapshot) {
            self.engine.set_snapshot((**snapshot).clone());
            self.snapshot = snapshot.clone();
        }
        self.engine.search(query)
    }
}

fn initial_layout(settings: &Settings) -> LayoutMode {
    match LocalStorage::open() {
        Ok(store) => load_layout(&store, settings),
        Err(e) => {
            log::warn!("{}", e);
            LayoutMode::default()
        }
    }
}

#[function_component(WindowManagerApp)]
pub fn window_manager_app(props: &WindowManagerProps) -> Html {
    let settings = &props.settings;
    let data = use_windows_data(settings.view_port_name.clone());
    let layout = use_state(|| initial_layout(settings));
    let search_text = use_state(String::new);
    let debounced_text = use_state(String::new);
    let debouncer = use_mut_ref(Debouncer::new);
    let search = use_mut_ref(|| SnapshotSearch::new(settings.search_cache_capacity));
    let action_error = use_state(|| None::<String>);

    // Search input: apply the query once typing settles
    let on_search_input = {
        let search_text = search_text.clone();
        let debounced_text = debounced_text.clone();
        let debouncer = debouncer.clone();
        let delay = Duration::from_millis(u64::from(settings.debounce_ms));

        Callback::from(move |e: InputEvent| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let value = input.value();
            search_text.set(value.clone());

            let ticket = debouncer.borrow_mut().schedule();
            let debouncer = debouncer.clone();
            let debounced_text = debounced_text.clone();
            spawn_local(async move {
                sleep(delay).await;
                if debouncer.borrow().is_current(ticket) {
                    debounced_text.set(value);
                }
            });
        })
    };

    let on_clear_search = {
        let search_text = search_text.clone();
        let debounced_text = debounced_text.clone();
        let debouncer = debouncer.clone();

        Callback::from(move |_: MouseEvent| {
            debouncer.borrow_mut().cancel();
            search_text.set(String::new());
            debounced_text.set(String::new());
        })
    };

    let on_layout_change = {
        let layout = layout.clone();
        let settings = settings.clone();

        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                let mode = LayoutMode::resolve(Some(&select.value()));
                match LocalStorage::open() {
                    Ok(store) => save_layout(&store, &settings, mode),
                    Err(e) => log::warn!("{}", e),
                }
                layout.set(mode);
            }
        })
    };

    let on_retry = {
        let refresh = data.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    let on_action_error = {
        let action_error = action_error.clone();
        Callback::from(move |message: String| action_error.set(Some(message)))
    };

    let on_dismiss_error = {
        let action_error = action_error.clone();
        Callback::from(move |_: ()| action_error.set(None))
    };

    if let Some(error) = &data.error {
        return html! {
            <div class="error-page">
                <div class="error-card">
                    <Alert r#type={AlertType::Danger} title={"Error Loading Windows"} inline={true}>
                        {error.clone()}
                    </Alert>
                    <Button onclick={on_retry} variant={ButtonVariant::Primary} block={true}>
                        {"Try Again"}
                    </Button>
                </div>
            </div>
        };
    }

    let query = (*debounced_text).clone();
    let searching = !query.trim().is_empty();
    let SearchResult {
        windows: filtered,
        matching_tab_ids,
    } = search.borrow_mut().search(&data.windows, &query);

    let total_windows = data.windows.len();
    let total_tabs = count_tabs(&data.windows);
    let shown_windows = filtered.len();
    let shown_tabs = if searching { matching_tab_ids.len() } else { total_tabs };

    let stat = |shown: usize, total: usize| -> Html {
        html! {
            <span class="stat-value">
                {shown}
                if searching && shown != total {
                    <span class="stat-total">{format!("/{}", total)}</span>
                }
            </span>
        }
    };

    let container_style = layout
        .column_count()
        .map(|columns| format!("column-count: {}", columns));

    html! {
        <div class="manager">
            <header class="manager-header">
                <div class="manager-title-group">
                    <h1 class="manager-title">{"Chrome Window Manager"}</h1>
                    <div class="manager-stats">
                        {stat(shown_windows, total_windows)}
                        <span class="stat-label">{"windows"}</span>
                        {stat(shown_tabs, total_tabs)}
                        <span class="stat-label">{"tabs"}</span>
                    </div>
                </div>

                // Search bar
                <div class="search-container">
                    <input
                        type="text"
                        placeholder="Search tabs and windows..."
                        value={(*search_text).clone()}
                        oninput={on_search_input}
                        class="search-input"
                    />
                    if !search_text.is_empty() {
                        <button class="search-clear" title="Clear search" onclick={on_clear_search.clone()}>
                            {"✕"}
                        </button>
                    }
                </div>

                // Layout mode selector
                <select class="layout-select" onchange={on_layout_change}>
                    {for LayoutMode::OPTIONS.iter().map(|(mode, label)| html! {
                        <option value={mode.preference()} selected={*mode == *layout}>
                            {*label}
                        </option>
                    })}
                </select>
            </header>

            <main class="manager-content">
                if let Some(message) = (*action_error).clone() {
                    <ActionError
                        message={message}
                        on_refresh={data.refresh.clone()}
                        on_dismiss={on_dismiss_error}
                    />
                }
                if data.loading && data.windows.is_empty() {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading windows..."}</p>
                    </div>
                } else if filtered.is_empty() {
                    <div class="empty-state">
                        if searching {
                            <h2>{"No Results Found"}</h2>
                            <p>{format!("No tabs or windows match \"{}\"", query)}</p>
                            <Button onclick={on_clear_search} variant={ButtonVariant::Primary}>
                                {"Clear Search"}
                            </Button>
                        } else {
                            <h2>{"No Windows Found"}</h2>
                            <p>{"It looks like there are no Chrome windows open."}</p>
                        }
                    </div>
                } else {
                    <div class={layout.container_class()} style={container_style}>
                        {for filtered.into_iter().map(|window| {
                            let id = window.id;
                            let focused = window.focused;
                            html! {
                                <div key={id} class="masonry-item">
                                    <WindowCard
                                        window={window}
                                        is_active={focused}
                                        search_text={query.clone()}
                                        on_tab_change={data.refresh.clone()}
                                        on_error={on_action_error.clone()}
                                    />
                                </div>
                            }
                        })}
                    </div>
                }
            </main>
        </div>
    }
}
