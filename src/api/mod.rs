//! Task Store Access
//!
//! Client-side bindings to the remote task store, organized as a trait so views and
//! tests do not care which transport sits underneath.

mod envelope;
mod http;

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{Task, TaskDraft};

pub use http::HttpTaskStore;

/// Remote CRUD operations over the Task resource.
///
/// Futures are not `Send`: in the browser they run on the single event loop.
#[async_trait(?Send)]
pub trait TaskStore {
    /// List all tasks
    async fn list_tasks(&self) -> ClientResult<Vec<Task>>;

    /// Set the completion flag of a task.
    ///
    /// Returns the updated task when the server echoes one back.
    async fn set_completed(&self, id: u32, completed: bool) -> ClientResult<Option<Task>>;

    /// Create a task from a form draft; blank titles never reach the network
    async fn create_task(&self, draft: &TaskDraft) -> ClientResult<Task>;

    /// Delete a task by ID
    async fn delete_task(&self, id: u32) -> ClientResult<()>;
}
