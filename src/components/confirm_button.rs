//! Confirm Button Component
//!
//! Action button with an optional inline confirmation step.

use leptos::prelude::*;

use crate::actions::Confirmation;

/// Inline confirmation button
///
/// Without a prompt a click fires `on_confirm(NotAsked)` right away. With one, the
/// click shows the prompt with ✓/✗ buttons that answer `Granted` or `Declined`.
/// Nothing blocks while the prompt is open.
///
/// # Arguments
/// * `button_class` - CSS class for the idle button
/// * `label` - Idle button text
/// * `prompt` - Question shown before firing, if any
/// * `busy` - Shows a spinner and ignores clicks while true
/// * `on_confirm` - Receives the user's answer
#[component]
pub fn ConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] label: String,
    #[prop(into)] prompt: Option<String>,
    busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<Confirmation>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);
    let prompt_text = prompt.clone().unwrap_or_default();
    let has_prompt = prompt.is_some();

    view! {
        <Show when=move || busy.get()>
            <span class="spinner small">"…"</span>
        </Show>
        <Show when=move || !busy.get() && !asking.get()>
            <button
                class=button_class.clone()
                on:click=move |ev| {
                    ev.stop_propagation();
                    if has_prompt {
                        set_asking.set(true);
                    } else {
                        on_confirm.run(Confirmation::NotAsked);
                    }
                }
            >
                {label.clone()}
            </button>
        </Show>
        <Show when=move || !busy.get() && asking.get()>
            <span class="inline-confirm">
                <span class="inline-confirm-text">{prompt_text.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                        on_confirm.run(Confirmation::Granted);
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                        on_confirm.run(Confirmation::Declined);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
