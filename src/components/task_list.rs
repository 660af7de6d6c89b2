//! Task List Component
//!
//! Renders the `todos` query as loading, empty or populated.

use leptos::prelude::*;

use crate::actions::{todos_query, TODOS_KEY};
use crate::components::TaskItem;
use crate::context::AppContext;
use crate::query::use_query;
use crate::view_state::ListState;

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let todos = use_query(&ctx.cache(), TODOS_KEY, todos_query(ctx.store()));

    let tasks = move || todos.with(|result| result.value.clone().unwrap_or_default());

    view! {
        <section class="task-list">
            <h2 class="task-list-title">"All Tasks"</h2>

            <Show when=move || todos.with(|result| result.loading && result.value.is_some())>
                <span class="spinner small">"Refreshing…"</span>
            </Show>

            {move || match ListState::from_result(&todos.get()) {
                ListState::Loading if todos.with(ListState::shows_spinner) => view! {
                    <div class="spinner">"Loading..."</div>
                }.into_any(),
                ListState::Loading => ().into_any(),
                ListState::Empty => view! {
                    <p class="empty-state">"All tasks completed! 🤞"</p>
                }.into_any(),
                ListState::Populated(loaded) => view! {
                    <p class="task-count">{format!("{} tasks", loaded.len())}</p>
                }.into_any(),
            }}

            <For
                each=tasks
                // Key on the rendered fields too so a changed task re-renders
                key=|task| (task.id, task.completed, task.title.clone(), task.description.clone())
                children=move |task| view! { <TaskItem task=task /> }
            />
        </section>
    }
}
