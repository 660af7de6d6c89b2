//! Task Form Component
//!
//! Form for creating new tasks.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::context::AppContext;
use crate::models::TaskDraft;
use crate::view_state::MutationState;

/// Form for creating new tasks
#[component]
pub fn TaskForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (submitting, set_submitting) = signal(MutationState::Idle);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked().is_in_flight() {
            return;
        }
        let draft = TaskDraft::new(title.get_untracked(), description.get_untracked());
        let store = ctx.store();
        let cache = ctx.cache();

        set_submitting.set(MutationState::InFlight);
        spawn_local(async move {
            let outcome = actions::create_task(store.as_ref(), &cache, &draft).await;
            let next = actions::draft_after_create(draft, &outcome);
            set_title.set(next.title);
            set_description.set(next.description);
            set_submitting.set(MutationState::Idle);
        });
    };

    view! {
        <form class="task-form" on:submit=create_task>
            <div class="task-form-row">
                <input
                    type="text"
                    placeholder="Add new task..."
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || submitting.get().is_in_flight()>
                    {move || if submitting.get().is_in_flight() { "…" } else { "Add" }}
                </button>
            </div>
            <textarea
                class="task-form-description"
                placeholder="Description (optional)"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            ></textarea>
        </form>
    }
}
