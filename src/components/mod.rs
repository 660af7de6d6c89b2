//! UI Components
//!
//! Leptos views over the task list query.

mod confirm_button;
mod task_form;
mod task_item;
mod task_list;

pub use confirm_button::ConfirmButton;
pub use task_form::TaskForm;
pub use task_item::TaskItem;
pub use task_list::TaskList;
