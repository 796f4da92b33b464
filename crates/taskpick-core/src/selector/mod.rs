//! Budgeted task selection.
//!
//! Picks the subset of tasks with the highest total importance whose whole-unit
//! time costs fit in a budget (0/1 knapsack, solved exactly by dynamic
//! programming over floored costs).
//!
//! Three outcomes:
//! - **Empty**: no tasks, the original budget is handed back untouched
//! - **Fallback**: the budget admits no task at all, so the single most
//!   important task is suggested anyway and `remaining_time` is reported as 0
//! - **Optimal**: the exact optimum, reconstructed in reverse input order
//!
//! Inclusion only wins on a strict improvement, so equal-value alternatives
//! resolve towards leaving a task out.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationError};
use crate::task::{Task, TaskId};

/// Default cap on the number of cells in the selection table.
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 10_000_000;

/// Selector configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Largest table (`rows * columns`) the selector may allocate
    pub max_table_cells: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }
}

/// Which branch produced a [`SelectionResult`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    /// No candidate tasks
    Empty,
    /// Single best task suggested despite the budget
    Fallback,
    /// Exact optimum within the budget
    Optimal,
}

/// Outcome of a selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    /// Chosen tasks, last-scanned first
    pub selected_tasks: Vec<Task>,
    /// Sum of importance over `selected_tasks`
    pub total_value: f64,
    /// Budget left over (0 as a sentinel in the fallback branch)
    pub remaining_time: f64,
    /// Branch that produced this result
    pub strategy: SelectionStrategy,
}

impl SelectionResult {
    fn empty(budget: f64) -> Self {
        Self {
            selected_tasks: Vec::new(),
            total_value: 0.0,
            remaining_time: budget,
            strategy: SelectionStrategy::Empty,
        }
    }

    /// True when nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.selected_tasks.is_empty()
    }

    /// Whole budget units consumed by the selected tasks.
    pub fn used_time(&self) -> i64 {
        self.selected_tasks.iter().map(Task::cost).sum()
    }

    /// Ids of the selected tasks, in selection order.
    pub fn selected_ids(&self) -> Vec<TaskId> {
        self.selected_tasks.iter().map(|t| t.id).collect()
    }
}

/// Knapsack-based task selector
#[derive(Debug, Clone, Default)]
pub struct TaskSelector {
    config: SelectorConfig,
}

impl TaskSelector {
    /// Create a new selector with default config
    pub fn new() -> Self {
        Self {
            config: SelectorConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Select the most valuable subset of `tasks` that fits in `budget`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a non-finite budget or an invalid
    /// task, and [`CoreError::ResourceExhausted`] when the table would exceed
    /// the configured cell limit or cannot be allocated.
    pub fn select(&self, tasks: &[Task], budget: f64) -> Result<SelectionResult> {
        let capacity = validate_inputs(tasks, budget)?;

        if tasks.is_empty() {
            tracing::debug!(budget, "no candidate tasks");
            return Ok(SelectionResult::empty(budget));
        }

        if is_degenerate(tasks, capacity) {
            return Ok(self.fallback(tasks, capacity));
        }

        let n = tasks.len();
        let width = table_width(tasks, capacity);
        let cells = self.reserve_cells(n + 1, width)?;
        tracing::debug!(tasks = n, capacity, width, cells, "building selection table");

        let mut value: Vec<f64> = allocate(cells, self.config.max_table_cells)?;
        let mut keep: Vec<bool> = allocate(cells, self.config.max_table_cells)?;

        for (i, task) in tasks.iter().enumerate().map(|(i, t)| (i + 1, t)) {
            let cost = task.cost();
            let (done, rest) = value.split_at_mut(i * width);
            let prev = &done[(i - 1) * width..];
            let row = &mut rest[..width];

            for w in 0..width {
                let exclude = prev[w];
                row[w] = exclude;
                if cost <= w as i64 {
                    let include = task.importance + prev[w - cost as usize];
                    if include > exclude {
                        row[w] = include;
                        keep[i * width + w] = true;
                    }
                }
            }
        }

        let mut selected_tasks = Vec::new();
        let mut w = width - 1;
        for i in (1..=n).rev() {
            if keep[i * width + w] {
                let task = &tasks[i - 1];
                selected_tasks.push(task.clone());
                w -= task.cost() as usize;
            }
        }

        // Sum over the selection itself; the table adds in input order.
        let total_value = selected_tasks.iter().fold(0.0, |acc, t| acc + t.importance);
        let used = selected_tasks.iter().fold(0.0, |acc, t| acc + t.time.floor());
        let result = SelectionResult {
            total_value,
            remaining_time: budget.floor() - used,
            selected_tasks,
            strategy: SelectionStrategy::Optimal,
        };
        tracing::debug!(
            selected = result.selected_tasks.len(),
            total_value = result.total_value,
            remaining_time = result.remaining_time,
            "selection complete"
        );
        Ok(result)
    }

    /// Optimal total importance for `tasks` under `budget`, without the subset.
    ///
    /// Uses a single rolling row, so memory grows with the budget only. Agrees
    /// with `select(..).total_value` in every branch; with fractional
    /// importances the two may differ in the last bit, since the row adds
    /// values in input order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`TaskSelector::select`].
    pub fn max_value(&self, tasks: &[Task], budget: f64) -> Result<f64> {
        let capacity = validate_inputs(tasks, budget)?;

        if tasks.is_empty() {
            return Ok(0.0);
        }
        if is_degenerate(tasks, capacity) {
            return Ok(tasks[fallback_index(tasks)].importance);
        }

        let width = table_width(tasks, capacity);
        let cells = self.reserve_cells(1, width)?;
        let mut best: Vec<f64> = allocate(cells, self.config.max_table_cells)?;

        for task in tasks {
            let cost = task.cost();
            if cost >= width as i64 {
                continue;
            }
            let cost = cost as usize;
            for w in (cost..width).rev() {
                let include = task.importance + best[w - cost];
                if include > best[w] {
                    best[w] = include;
                }
            }
        }

        Ok(best[width - 1])
    }

    fn fallback(&self, tasks: &[Task], capacity: i64) -> SelectionResult {
        let task = &tasks[fallback_index(tasks)];
        if task.cost() > capacity {
            tracing::warn!(
                task_id = task.id,
                cost = task.cost(),
                capacity,
                "no task fits the budget; suggesting the most important task anyway"
            );
        } else {
            tracing::debug!(
                task_id = task.id,
                capacity,
                "degenerate budget, single-task fallback"
            );
        }

        SelectionResult {
            selected_tasks: vec![task.clone()],
            total_value: task.importance,
            remaining_time: 0.0,
            strategy: SelectionStrategy::Fallback,
        }
    }

    fn reserve_cells(&self, rows: usize, width: usize) -> Result<usize> {
        let cells = rows as u128 * width as u128;
        if cells > self.config.max_table_cells as u128 {
            return Err(CoreError::ResourceExhausted {
                cells,
                limit: self.config.max_table_cells,
            });
        }
        Ok(cells as usize)
    }
}

/// Select with the default configuration.
///
/// See [`TaskSelector::select`].
pub fn select(tasks: &[Task], budget: f64) -> Result<SelectionResult> {
    TaskSelector::new().select(tasks, budget)
}

/// Optimal value with the default configuration.
///
/// See [`TaskSelector::max_value`].
pub fn max_value(tasks: &[Task], budget: f64) -> Result<f64> {
    TaskSelector::new().max_value(tasks, budget)
}

/// Validate all inputs and return the whole-unit budget.
///
/// The budget saturates at `i64::MAX`; it only sizes the table and is never
/// reported back.
fn validate_inputs(tasks: &[Task], budget: f64) -> Result<i64> {
    ValidationError::require_finite("budget", budget)?;
    for task in tasks {
        task.validate()?;
    }
    Ok(budget.floor() as i64)
}

/// No task can be placed under strict budget semantics.
fn is_degenerate(tasks: &[Task], capacity: i64) -> bool {
    capacity <= 0 || tasks.iter().all(|t| t.cost() > capacity)
}

/// Highest importance, then lowest time, then earliest position.
fn fallback_index(tasks: &[Task]) -> usize {
    let mut best = 0;
    for (i, task) in tasks.iter().enumerate().skip(1) {
        let current = &tasks[best];
        if task.importance > current.importance
            || (task.importance == current.importance && task.time < current.time)
        {
            best = i;
        }
    }
    best
}

/// Number of budget columns the table needs.
///
/// Columns past the total cost of all tasks repeat the same decisions, so the
/// table stops there.
fn table_width(tasks: &[Task], capacity: i64) -> usize {
    let total_cost = tasks
        .iter()
        .fold(0i64, |acc, t| acc.saturating_add(t.cost()));
    let columns = capacity.min(total_cost).saturating_add(1);
    usize::try_from(columns).unwrap_or(usize::MAX)
}

fn allocate<T: Default + Clone>(cells: usize, limit: u64) -> Result<Vec<T>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(cells)
        .map_err(|_| CoreError::ResourceExhausted {
            cells: cells as u128,
            limit,
        })?;
    table.resize(cells, T::default());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: TaskId, importance: f64, time: f64) -> Task {
        Task::new(id, format!("task-{id}"), importance, time)
    }

    #[test]
    fn empty_tasks_return_original_budget() {
        let result = select(&[], 42.7).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total_value, 0.0);
        assert_eq!(result.remaining_time, 42.7);
        assert_eq!(result.strategy, SelectionStrategy::Empty);
    }

    #[test]
    fn zero_budget_falls_back_to_most_important() {
        let tasks = vec![task(1, 5.0, 10.0), task(2, 8.0, 20.0)];
        let result = select(&tasks, 0.0).unwrap();
        assert_eq!(result.selected_ids(), vec![2]);
        assert_eq!(result.total_value, 8.0);
        assert_eq!(result.remaining_time, 0.0);
        assert_eq!(result.strategy, SelectionStrategy::Fallback);
    }

    #[test]
    fn fallback_tie_prefers_lower_time() {
        let tasks = vec![task(1, 5.0, 3.0), task(2, 5.0, 1.0)];
        let result = select(&tasks, 0.0).unwrap();
        assert_eq!(result.selected_ids(), vec![2]);
    }

    #[test]
    fn fallback_full_tie_keeps_first() {
        let tasks = vec![task(1, 5.0, 3.0), task(2, 5.0, 3.0)];
        let result = select(&tasks, -4.0).unwrap();
        assert_eq!(result.selected_ids(), vec![1]);
    }

    #[test]
    fn fallback_when_every_task_exceeds_budget() {
        let tasks = vec![task(1, 3.0, 50.0), task(2, 9.0, 70.0), task(3, 9.0, 40.0)];
        let result = select(&tasks, 30.0).unwrap();
        assert_eq!(result.selected_ids(), vec![3]);
        assert_eq!(result.remaining_time, 0.0);
        assert_eq!(result.strategy, SelectionStrategy::Fallback);
    }

    #[test]
    fn fractional_budget_below_one_is_degenerate() {
        let tasks = vec![task(1, 2.0, 0.4)];
        let result = select(&tasks, 0.9).unwrap();
        assert_eq!(result.strategy, SelectionStrategy::Fallback);
        assert_eq!(result.selected_ids(), vec![1]);
    }

    #[test]
    fn picks_optimal_pair_over_single_heavy_task() {
        let tasks = vec![task(1, 10.0, 60.0), task(2, 20.0, 30.0), task(3, 30.0, 30.0)];
        let result = select(&tasks, 60.0).unwrap();
        assert_eq!(result.selected_ids(), vec![3, 2]);
        assert_eq!(result.total_value, 50.0);
        assert_eq!(result.remaining_time, 0.0);
        assert_eq!(result.strategy, SelectionStrategy::Optimal);
    }

    #[test]
    fn identical_tasks_with_room_for_one_select_exactly_one() {
        let tasks = vec![task(1, 7.0, 5.0), task(2, 7.0, 5.0)];
        let result = select(&tasks, 5.0).unwrap();
        assert_eq!(result.selected_tasks.len(), 1);
        // The later task only ties the earlier one, so it is not included and
        // reconstruction falls through to the first.
        assert_eq!(result.selected_ids(), vec![1]);
        assert_eq!(result.total_value, 7.0);
        assert_eq!(result.remaining_time, 0.0);
    }

    #[test]
    fn zero_value_tasks_are_never_included() {
        let tasks = vec![task(1, 0.0, 1.0), task(2, 4.0, 2.0)];
        let result = select(&tasks, 10.0).unwrap();
        assert_eq!(result.selected_ids(), vec![2]);
        assert_eq!(result.remaining_time, 8.0);
    }

    #[test]
    fn fractional_times_are_truncated() {
        let tasks = vec![task(1, 3.0, 1.9), task(2, 4.0, 1.1)];
        let result = select(&tasks, 2.5).unwrap();
        assert_eq!(result.selected_ids(), vec![2, 1]);
        assert_eq!(result.used_time(), 2);
        assert_eq!(result.remaining_time, 0.0);
    }

    #[test]
    fn zero_cost_tasks_are_free() {
        let tasks = vec![task(1, 2.0, 0.3), task(2, 5.0, 4.0)];
        let result = select(&tasks, 4.0).unwrap();
        assert_eq!(result.selected_ids(), vec![2, 1]);
        assert_eq!(result.total_value, 7.0);
    }

    #[test]
    fn negative_importance_is_excluded() {
        let tasks = vec![task(1, -3.0, 1.0), task(2, 2.0, 1.0)];
        let result = select(&tasks, 5.0).unwrap();
        assert_eq!(result.selected_ids(), vec![2]);
        assert_eq!(result.total_value, 2.0);
    }

    #[test]
    fn rejects_non_finite_budget() {
        let err = select(&[task(1, 1.0, 1.0)], f64::NAN).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(select(&[], f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_invalid_tasks_before_building_table() {
        let tasks = vec![task(1, 1.0, 1.0), task(2, f64::NAN, 1.0)];
        assert!(matches!(select(&tasks, 10.0), Err(CoreError::Validation(_))));

        let tasks = vec![task(1, 1.0, -2.0)];
        assert!(matches!(select(&tasks, 10.0), Err(CoreError::Validation(_))));
    }

    #[test]
    fn oversized_table_is_resource_exhausted() {
        let selector = TaskSelector::with_config(SelectorConfig { max_table_cells: 100 });
        let tasks = vec![task(1, 1.0, 60.0), task(2, 2.0, 60.0)];
        let err = selector.select(&tasks, 90.0).unwrap_err();
        assert!(matches!(err, CoreError::ResourceExhausted { limit: 100, .. }));
    }

    #[test]
    fn huge_budget_with_small_tasks_stays_bounded() {
        let tasks = vec![task(1, 3.0, 2.0), task(2, 4.0, 3.0)];
        let result = select(&tasks, 1.0e12).unwrap();
        assert_eq!(result.selected_ids(), vec![2, 1]);
        assert_eq!(result.remaining_time, 1.0e12 - 5.0);
    }

    #[test]
    fn budget_beyond_i64_keeps_remaining_time_exact() {
        let tasks = vec![task(1, 3.0, 2.0), task(2, 4.0, 3.0)];
        let result = select(&tasks, 1.0e19).unwrap();
        assert_eq!(result.selected_ids(), vec![2, 1]);
        assert_eq!(result.strategy, SelectionStrategy::Optimal);
        assert_eq!(result.remaining_time, 1.0e19 - 5.0);
        assert!(result.remaining_time > i64::MAX as f64);
    }

    #[test]
    fn fractional_importance_total_matches_selected_sum() {
        let tasks = vec![task(1, 0.1, 1.0), task(2, 0.2, 1.0), task(3, 0.3, 1.0)];
        let result = select(&tasks, 10.0).unwrap();
        assert_eq!(result.selected_ids(), vec![3, 2, 1]);

        let summed = result
            .selected_tasks
            .iter()
            .fold(0.0, |acc, t| acc + t.importance);
        assert_eq!(result.total_value, summed);
        assert_eq!(result.total_value, 0.3 + 0.2 + 0.1);
        assert_eq!(result.remaining_time, 7.0);
    }

    #[test]
    fn max_value_matches_select() {
        let tasks = vec![
            task(1, 10.0, 60.0),
            task(2, 20.0, 30.0),
            task(3, 30.0, 30.0),
            task(4, 15.0, 10.0),
        ];
        for budget in [0.0, 10.0, 35.5, 60.0, 70.0, 200.0] {
            let selected = select(&tasks, budget).unwrap();
            assert_eq!(
                max_value(&tasks, budget).unwrap(),
                selected.total_value,
                "budget {budget}"
            );
        }
        assert_eq!(max_value(&[], 10.0).unwrap(), 0.0);
    }
}
