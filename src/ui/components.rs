/// Reusable UI components: window cards and tab rows

use crate::actions::{close_tab, switch_to_tab};
use crate::display::{TabLoad, display_domain, favicon_url, highlight_segments, window_title};
use crate::host::ChromeHost;
use crate::tab_data::{Tab, Window, WindowState};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HighlightedProps {
    pub text: AttrValue,
    #[prop_or_default]
    pub query: AttrValue,
}

/// Text with every occurrence of the query wrapped in `<mark>`
#[function_component(Highlighted)]
pub fn highlighted(props: &HighlightedProps) -> Html {
    html! {
        <>
            {for highlight_segments(&props.text, &props.query).into_iter().map(|segment| {
                if segment.highlighted {
                    html! { <mark class="search-highlight">{segment.text}</mark> }
                } else {
                    html! { <>{segment.text}</> }
                }
            })}
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct TabItemProps {
    pub tab: Tab,
    #[prop_or_default]
    pub search_text: AttrValue,
    #[prop_or(true)]
    pub compact: bool,
    pub on_tab_change: Callback<()>,
    #[prop_or_default]
    pub on_error: Callback<String>,
}

#[function_component(TabItem)]
pub fn tab_item(props: &TabItemProps) -> Html {
    let icon_failed = use_state(|| false);
    let tab = &props.tab;

    // Switch to tab handler
    let on_click = {
        let tab_id = tab.id;
        let on_tab_change = props.on_tab_change.clone();
        let on_error = props.on_error.clone();

        Callback::from(move |_: MouseEvent| {
            let on_tab_change = on_tab_change.clone();
            let on_error = on_error.clone();
            spawn_local(async move {
                match switch_to_tab(&ChromeHost, tab_id).await {
                    Ok(_) => on_tab_change.emit(()),
                    Err(e) => {
                        log::warn!("{}", e);
                        on_error.emit(e.to_string());
                    }
                }
            });
        })
    };

    // Close tab handler
    let on_close = {
        let tab_id = tab.id;
        let on_tab_change = props.on_tab_change.clone();
        let on_error = props.on_error.clone();

        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            let on_tab_change = on_tab_change.clone();
            let on_error = on_error.clone();
            spawn_local(async move {
                match close_tab(&ChromeHost, tab_id).await {
                    Ok(_) => on_tab_change.emit(()),
                    Err(e) => {
                        log::warn!("{}", e);
                        on_error.emit(e.to_string());
                    }
                }
            });
        })
    };

    let on_icon_error = {
        let icon_failed = icon_failed.clone();
        Callback::from(move |_: Event| icon_failed.set(true))
    };

    let icon = match favicon_url(tab) {
        Some(src) if !*icon_failed => html! {
            <img src={src} alt="" class="tab-favicon" onerror={on_icon_error} />
        },
        _ => html! { <div class="tab-favicon-placeholder"></div> },
    };

    let classes = classes!(
        "tab-item",
        props.compact.then_some("compact"),
        tab.active.then_some("active"),
    );

    html! {
        <div class={classes} onclick={on_click} title={tab.url.clone()}>
            {icon}
            <div class="tab-content">
                <div class="tab-title">
                    <Highlighted text={tab.title.clone()} query={props.search_text.clone()} />
                    if tab.pinned {
                        <span class="tab-pinned" title="Pinned">{"📌"}</span>
                    }
                </div>
                if !props.compact {
                    <div class="tab-url">
                        <Highlighted text={display_domain(&tab.url)} query={props.search_text.clone()} />
                    </div>
                }
            </div>
            <button class="tab-close" title="Close tab" onclick={on_close}>
                {"✕"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WindowCardProps {
    pub window: Window,
    #[prop_or(false)]
    pub is_active: bool,
    #[prop_or_default]
    pub search_text: AttrValue,
    pub on_tab_change: Callback<()>,
    #[prop_or_default]
    pub on_error: Callback<String>,
}

/// Collapsible card listing one window's tabs
#[function_component(WindowCard)]
pub fn window_card(props: &WindowCardProps) -> Html {
    let collapsed = use_state(|| false);
    let window = &props.window;

    let toggle_collapsed = {
        let collapsed = collapsed.clone();
        Callback::from(move |_: MouseEvent| {
            collapsed.set(!*collapsed);
        })
    };

    let minimized = window.state == WindowState::Minimized;
    let card_state = if props.is_active {
        Some("active")
    } else if window.focused {
        Some("focused")
    } else if minimized {
        Some("minimized")
    } else {
        None
    };

    html! {
        <div class={classes!("window-card", card_state)}>
            <div class="window-header" onclick={toggle_collapsed}>
                <span class="window-icon">
                    {if window.incognito { "🕶️" } else { "🗔" }}
                </span>
                <div class="window-heading">
                    <div class="window-title">
                        <Highlighted text={window_title(window)} query={props.search_text.clone()} />
                    </div>
                    <div class="window-meta">
                        <span>{format!("{} tabs", window.tabs.len())}</span>
                        <span>{format!(" • Window {}", window.id)}</span>
                        if window.incognito {
                            <span class="window-incognito">{" • Incognito"}</span>
                        }
                        if minimized {
                            <span class="window-minimized">{" • Minimized"}</span>
                        }
                    </div>
                </div>
                <span class={TabLoad::for_count(window.tabs.len()).badge_class()}>
                    {window.tabs.len()}
                </span>
                <span class="window-toggle">{if *collapsed { "▶" } else { "▼" }}</span>
            </div>

            if !*collapsed {
                <div class="window-tabs">
                    {for window.tabs.iter().map(|tab| html! {
                        <TabItem
                            key={tab.id}
                            tab={tab.clone()}
                            search_text={props.search_text.clone()}
                            on_tab_change={props.on_tab_change.clone()}
                            on_error={props.on_error.clone()}
                        />
                    })}
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ActionErrorProps {
    pub message: AttrValue,
    pub on_refresh: Callback<()>,
    pub on_dismiss: Callback<()>,
}

/// Inline notice for a failed switch/close, with a manual refresh
#[function_component(ActionError)]
pub fn action_error(props: &ActionErrorProps) -> Html {
    let on_refresh = {
        let on_refresh = props.on_refresh.clone();
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| {
            on_dismiss.emit(());
            on_refresh.emit(());
        })
    };
    let on_dismiss = props.on_dismiss.reform(|_: MouseEvent| ());

    html! {
        <div class="action-error">
            <Alert r#type={AlertType::Warning} title={props.message.to_string()} inline={true}>
                <Button onclick={on_refresh} variant={ButtonVariant::Link}>{"Refresh"}</Button>
                <Button onclick={on_dismiss} variant={ButtonVariant::Link}>{"Dismiss"}</Button>
            </Alert>
        </div>
    }
}
