/// Toolbar popup: compact list of all windows with a refresh button

use crate::config::Settings;
use crate::snapshot::count_tabs;
use crate::ui::components::{ActionError, WindowCard};
use crate::ui::hooks::use_windows_data;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PopupProps {
    #[prop_or_default]
    pub settings: Settings,
}

#[function_component(PopupApp)]
pub fn popup_app(props: &PopupProps) -> Html {
    let data = use_windows_data(props.settings.view_port_name.clone());
    let action_error = use_state(|| None::<String>);

    let on_action_error = {
        let action_error = action_error.clone();
        Callback::from(move |message: String| action_error.set(Some(message)))
    };

    let on_dismiss_error = {
        let action_error = action_error.clone();
        Callback::from(move |_: ()| action_error.set(None))
    };

    let on_refresh = {
        let refresh = data.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    if data.loading && data.windows.is_empty() {
        return html! {
            <div class="popup-loading">
                <Spinner />
                <span class="loading-text">{"Loading windows..."}</span>
            </div>
        };
    }

    if let Some(error) = &data.error {
        return html! {
            <div class="popup-error">
                <Alert r#type={AlertType::Danger} title={"Error loading windows:"} inline={true}>
                    {error.clone()}
                </Alert>
                <Button onclick={on_refresh} variant={ButtonVariant::Secondary}>
                    {"Retry"}
                </Button>
            </div>
        };
    }

    html! {
        <div class="popup">
            <div class="popup-header">
                <div>
                    <h1 class="popup-title">{"Chrome Windows"}</h1>
                    <p class="popup-summary">
                        {format!("{} windows • {} tabs", data.windows.len(), count_tabs(&data.windows))}
                    </p>
                </div>
                <Button onclick={on_refresh} variant={ButtonVariant::Secondary}>
                    {"⟳"}
                </Button>
            </div>

            if let Some(message) = (*action_error).clone() {
                <ActionError
                    message={message}
                    on_refresh={data.refresh.clone()}
                    on_dismiss={on_dismiss_error}
                />
            }

            <div class="popup-windows">
                if data.windows.is_empty() {
                    <div class="empty-state">
                        <p>{"No windows found"}</p>
                    </div>
                } else {
                    {for data.windows.iter().map(|window| html! {
                        <WindowCard
                            key={window.id}
                            window={window.clone()}
                            on_tab_change={data.refresh.clone()}
                            on_error={on_action_error.clone()}
                        />
                    })}
                }
            </div>
        </div>
    }
}
