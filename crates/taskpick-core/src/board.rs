//! Task board helpers for the presentation layer.
//!
//! The selector never looks at the `completed` flag; these helpers do the
//! filtering before a list is handed to it.

use crate::error::Result;
use crate::order::{order_by, SortDirection, SortKey};
use crate::selector::{SelectionResult, TaskSelector};
use crate::task::Task;

/// Tasks still open, in input order.
pub fn pending(tasks: &[Task]) -> Vec<Task> {
    tasks.iter().filter(|t| !t.completed).cloned().collect()
}

/// Completed tasks, newest first.
pub fn completed_by_recency(tasks: &[Task]) -> Vec<Task> {
    let done: Vec<Task> = tasks.iter().filter(|t| t.completed).cloned().collect();
    order_by(&done, SortKey::Recency, SortDirection::Descending)
}

/// Suggest what to work on next within `budget`.
///
/// Completed tasks are skipped. As long as one pending task exists the result
/// names at least one of them, even if it does not fit the budget.
pub fn suggest(tasks: &[Task], budget: f64, selector: &TaskSelector) -> Result<SelectionResult> {
    let open = pending(tasks);
    tracing::debug!(total = tasks.len(), pending = open.len(), budget, "suggesting tasks");
    selector.select(&open, budget)
}
