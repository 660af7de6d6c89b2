//! Task Item Component
//!
//! One task row with toggle-complete and delete actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{self, CompletionChange, Confirmation};
use crate::components::ConfirmButton;
use crate::context::AppContext;
use crate::models::Task;
use crate::view_state::MutationState;

/// A single task row.
///
/// Shows the cache's copy of the task only; mutations never patch it locally.
#[component]
pub fn TaskItem(task: Task) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let id = task.id;
    let completed = task.completed;
    let badge = task.status_label();
    let row_class = if completed { "task-row completed" } else { "task-row" };
    let badge_class = if completed { "badge done" } else { "badge in-progress" };
    let toggle_label = if completed { "↺" } else { "✓" };
    let change = CompletionChange::for_task(&task);

    let (toggling, set_toggling) = signal(MutationState::Idle);
    let (deleting, set_deleting) = signal(MutationState::Idle);

    let on_toggle = move |confirmation: Confirmation| {
        if toggling.get_untracked().is_in_flight() {
            return;
        }
        let store = ctx.store();
        let cache = ctx.cache();
        set_toggling.set(MutationState::InFlight);
        spawn_local(async move {
            let _ = actions::toggle_completion(store.as_ref(), &cache, change, confirmation).await;
            set_toggling.set(MutationState::Idle);
        });
    };

    let on_delete = move |_: Confirmation| {
        if deleting.get_untracked().is_in_flight() {
            return;
        }
        let store = ctx.store();
        let cache = ctx.cache();
        set_deleting.set(MutationState::InFlight);
        spawn_local(async move {
            let _ = actions::delete_task(store.as_ref(), &cache, id).await;
            set_deleting.set(MutationState::Idle);
        });
    };

    view! {
        <div class=row_class>
            <div class="task-body">
                <span class="task-title">{task.title.clone()}</span>
                {task.description.clone().filter(|d| !d.is_empty()).map(|d| view! {
                    <span class="task-description">{d}</span>
                })}
                <span class=badge_class>{badge}</span>
            </div>

            <div class="task-actions">
                <ConfirmButton
                    button_class="toggle-btn"
                    label=toggle_label
                    prompt={change.prompt()}
                    busy=Signal::derive(move || toggling.get().is_in_flight())
                    on_confirm=on_toggle
                />
                <ConfirmButton
                    button_class="delete-btn"
                    label="×"
                    prompt={None::<String>}
                    busy=Signal::derive(move || deleting.get().is_in_flight())
                    on_confirm=on_delete
                />
            </div>
        </div>
    }
}
