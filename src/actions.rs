//! Task Actions
//!
//! Mutation glue shared by the views: run a mutation through the store, then
//! invalidate the task list on success. No optimistic updates; the list only
//! changes once the refetch lands.

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::api::TaskStore;
use crate::error::{ClientResult, ValidationError};
use crate::models::{Task, TaskDraft};
use crate::query::QueryCache;

/// Cache key of the task list query
pub const TODOS_KEY: &str = "todos";

/// Cache holding the task list
pub type TaskCache = QueryCache<Vec<Task>>;

/// Fetch function for the `TODOS_KEY` query
pub fn todos_query(store: Rc<dyn TaskStore>) -> impl Fn() -> LocalBoxFuture<'static, ClientResult<Vec<Task>>> + 'static {
    move || {
        let store = store.clone();
        async move { store.list_tasks().await }.boxed_local()
    }
}

/// User answer to the pre-mutation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// No prompt was shown
    NotAsked,
    Granted,
    Declined,
}

/// Target completion state for one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionChange {
    pub id: u32,
    pub completed: bool,
}

impl CompletionChange {
    /// Flip the task's current state
    pub fn for_task(task: &Task) -> Self {
        Self {
            id: task.id,
            completed: !task.completed,
        }
    }

    /// Un-completing a finished task needs an explicit yes
    pub fn requires_confirmation(&self) -> bool {
        !self.completed
    }

    pub fn prompt(&self) -> Option<String> {
        self.requires_confirmation()
            .then(|| "Task is already completed. Mark it as not completed?".to_string())
    }

    /// Gate the change on the user's answer
    pub fn check(&self, confirmation: Confirmation) -> ClientResult<()> {
        if !self.requires_confirmation() {
            return Ok(());
        }
        match confirmation {
            Confirmation::Granted => Ok(()),
            Confirmation::Declined => Err(ValidationError::ConfirmationDeclined.into()),
            Confirmation::NotAsked => Err(ValidationError::ConfirmationRequired.into()),
        }
    }
}

/// Apply a completion change and refresh the list.
///
/// Any success envelope counts, whether or not it echoes the task.
pub async fn toggle_completion(
    store: &dyn TaskStore,
    cache: &TaskCache,
    change: CompletionChange,
    confirmation: Confirmation,
) -> ClientResult<Option<Task>> {
    if let Err(err) = change.check(confirmation) {
        tracing::info!(id = change.id, %err, "completion change aborted");
        return Err(err);
    }
    match store.set_completed(change.id, change.completed).await {
        Ok(task) => {
            tracing::info!(id = change.id, completed = change.completed, "task updated");
            cache.invalidate(TODOS_KEY);
            Ok(task)
        }
        Err(err) => {
            tracing::warn!(id = change.id, %err, "failed to update task");
            Err(err)
        }
    }
}

/// Delete a task and refresh the list
pub async fn delete_task(store: &dyn TaskStore, cache: &TaskCache, id: u32) -> ClientResult<()> {
    match store.delete_task(id).await {
        Ok(()) => {
            tracing::info!(id, "task deleted");
            cache.invalidate(TODOS_KEY);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(id, %err, "failed to delete task");
            Err(err)
        }
    }
}

/// Create a task from the form draft and refresh the list
pub async fn create_task(store: &dyn TaskStore, cache: &TaskCache, draft: &TaskDraft) -> ClientResult<Task> {
    match store.create_task(draft).await {
        Ok(task) => {
            tracing::info!(id = task.id, title = %task.title, "task created");
            cache.invalidate(TODOS_KEY);
            Ok(task)
        }
        Err(err) => {
            tracing::warn!(%err, "failed to create task");
            Err(err)
        }
    }
}

/// Form contents after a create attempt: cleared on success, kept on failure so the
/// user can retry
pub fn draft_after_create(draft: TaskDraft, outcome: &ClientResult<Task>) -> TaskDraft {
    match outcome {
        Ok(_) => TaskDraft::default(),
        Err(_) => draft,
    }
}
