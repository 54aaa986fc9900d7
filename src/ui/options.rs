/// Options page: what the extension does and how to use it
use yew::prelude::*;

#[function_component(OptionsApp)]
pub fn options_app() -> Html {
    html! {
        <div class="options-page">
            <h1 class="options-title">{"Chrome Window Manager Settings"}</h1>

            <section class="options-section">
                <h2>{"About"}</h2>
                <p>
                    {"Chrome Window Manager helps you view and manage all your Chrome windows and tabs in one place."}
                </p>
            </section>

            <section class="options-section">
                <h2>{"Features"}</h2>
                <ul>
                    <li>{"View all Chrome windows grouped together"}</li>
                    <li>{"See all tabs within each window"}</li>
                    <li>{"Click on tabs to switch to them"}</li>
                    <li>{"Close tabs directly from the list"}</li>
                    <li>{"Search tabs by title or URL"}</li>
                    <li>{"Identify incognito windows and pinned tabs"}</li>
                </ul>
            </section>

            <section class="options-section">
                <h2>{"How to Use"}</h2>
                <ol>
                    <li>{"Click the extension icon in the toolbar"}</li>
                    <li>{"Browse your windows and tabs"}</li>
                    <li>{"Click on any tab to switch to it"}</li>
                    <li>{"Use the close button (✕) to close tabs"}</li>
                    <li>{"Pick a card size or column count from the layout menu"}</li>
                </ol>
            </section>
        </div>
    }
}
