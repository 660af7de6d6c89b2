//! Frontend Models
//!
//! Data structures matching the remote task store.

use serde::{Deserialize, Serialize};

use crate::error::{ClientResult, ValidationError};

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Badge text shown next to the title
    pub fn status_label(&self) -> &'static str {
        if self.completed { "Done" } else { "In Progress" }
    }
}

/// Unvalidated form input for a new task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

/// Request body for `POST /api/todo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Trim and check the draft, producing the request body
    pub fn validate(&self) -> ClientResult<NewTask> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let description = self.description.trim();
        Ok(NewTask {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}
