//! Todo Frontend App
//!
//! Builds the store and query cache, provides them to the view tree and lays out
//! the form above the task list.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::TaskCache;
use crate::api::{HttpTaskStore, TaskStore};
use crate::components::{TaskForm, TaskList};
use crate::config::ClientConfig;
use crate::context::AppContext;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let http = HttpTaskStore::new(&config.base_url);
    let store: Rc<dyn TaskStore> = Rc::new(http.clone());
    let cache = TaskCache::new(Rc::new(|task: LocalBoxFuture<'static, ()>| spawn_local(task)));

    // Provide context to all children
    let ctx = AppContext::new(cache, store);
    provide_context(ctx);
    on_cleanup(move || ctx.teardown());

    spawn_local(async move {
        match http.ping().await {
            Ok(message) => tracing::info!(base_url = %http.base_url(), %message, "task store reachable"),
            Err(err) => tracing::warn!(base_url = %http.base_url(), %err, "task store unreachable"),
        }
    });

    view! {
        <div class="app-layout">
            <header class="title-bar">
                <h1>"Tasks"</h1>
            </header>

            <main class="main-content">
                <TaskForm />
                <TaskList />
            </main>
        </div>
    }
}
