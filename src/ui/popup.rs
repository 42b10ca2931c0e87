/// Popup UI for Tab Tagger extension

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use crate::controller::{self, KeyOutcome, PopupState, page_label};
use crate::host::ChromeHost;
use crate::ui::components::{Loading, TagList};

/// Element ids of the popup form
pub const SELECTED_ID: &str = "tags-selected";
pub const INPUT_ID: &str = "tags-input";
pub const SUGGESTIONS_ID: &str = "tags-suggestions";
pub const FORM_ID: &str = "form";

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(PopupState::new);

    // Load the tab URL and its saved tags on mount
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let loaded = controller::initialize(&ChromeHost).await;
                log::debug!("Loaded {} tags", loaded.selected.len());
                state.set(loaded);
            });
            || ()
        });
    }

    let on_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*state).clone();
                next.on_input(input.value());
                state.set(next);
            }
        })
    };

    let on_key_down = {
        let state = state.clone();
        Callback::from(move |e: KeyboardEvent| {
            let Some(code) = controller::key_code(&e.key()) else {
                return;
            };
            let mut next = (*state).clone();
            if next.on_key_down(code) == KeyOutcome::PreventDefault {
                e.prevent_default();
                state.set(next);
            }
        })
    };

    // Fire and forget; the form still submits normally
    let on_submit = {
        let state = state.clone();
        Callback::from(move |_: SubmitEvent| {
            let snapshot = (*state).clone();
            spawn_local(async move {
                controller::submit(&ChromeHost, &snapshot).await;
            });
        })
    };

    let interactive = state.is_interactive();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Tagger"}</h1>

            if let Some(label) = page_label(&state.url) {
                <p class="page-label">{label}</p>
            }

            if !interactive {
                <Loading message={Some("Loading tags...".to_string())} />
            }

            <form id={FORM_ID} onsubmit={on_submit} class="flex-column-gap">
                <TagList id={SELECTED_ID} tags={state.selected.tags().to_vec()} />
                <input
                    id={INPUT_ID}
                    class="pf-v5-c-form-control"
                    type="text"
                    placeholder="Add a tag"
                    autocomplete="off"
                    value={state.input.clone()}
                    disabled={!interactive}
                    oninput={on_input}
                    onkeydown={on_key_down}
                />
                <TagList id={SUGGESTIONS_ID} tags={state.suggestions.clone()} class="tag-suggestions" />
                <button class="pf-v5-c-button pf-m-primary" type="submit" disabled={!interactive}>
                    {"Save"}
                </button>
            </form>

            <p class="footer-popup">
                {"Tab Tagger v0.1.0"}
            </p>
        </div>
    }
}
