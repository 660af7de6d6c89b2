//! View State
//!
//! Renderable states derived from the cache, kept free of DOM code so they can be
//! tested natively.

use crate::models::Task;
use crate::query::CachedResult;

/// What the task list shows for a given cache snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// No resolved value yet
    Loading,
    /// Resolved to zero tasks
    Empty,
    /// Resolved to one or more tasks
    Populated(Vec<Task>),
}

impl ListState {
    pub fn from_result(result: &CachedResult<Vec<Task>>) -> Self {
        match &result.value {
            None => ListState::Loading,
            Some(tasks) if tasks.is_empty() => ListState::Empty,
            Some(tasks) => ListState::Populated(tasks.clone()),
        }
    }
    /// Whether a `Loading` list shows its spinner. A first fetch that settled with an
    /// error hides it until something invalidates the list.
    pub fn shows_spinner(result: &CachedResult<Vec<Task>>) -> bool {
        result.value.is_none() && (result.loading || result.error.is_none())
    }
}

/// Progress of one user-triggered mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    InFlight,
}

impl MutationState {
    pub fn is_in_flight(self) -> bool {
        self == MutationState::InFlight
    }
}
