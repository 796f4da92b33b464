//! Stable task ordering for display.
//!
//! Sorting uses a top-down merge sort that always prefers the left half on
//! ties, so tasks that compare equal keep their input order in both
//! directions. Descending order negates the comparator; it never reverses an
//! ascending result, which would flip the order of ties.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::task::Task;

/// Field a task list can be ordered by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Importance score
    Importance,
    /// Time cost
    Time,
    /// Name, lexicographically
    Name,
    /// Creation timestamp
    #[serde(alias = "created_at")]
    CreatedAt,
    /// Task id; newer tasks have larger ids
    #[serde(alias = "id")]
    Recency,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Importance,
        SortKey::Time,
        SortKey::Name,
        SortKey::CreatedAt,
        SortKey::Recency,
    ];

    /// Compare two tasks by this key, ascending.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Importance => compare_values(a.importance, b.importance),
            SortKey::Time => compare_values(a.time, b.time),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Recency => a.id.cmp(&b.id),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Importance => "importance",
            SortKey::Time => "time",
            SortKey::Name => "name",
            SortKey::CreatedAt => "createdAt",
            SortKey::Recency => "recency",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "importance" => Ok(SortKey::Importance),
            "time" => Ok(SortKey::Time),
            "name" => Ok(SortKey::Name),
            "createdAt" | "created_at" => Ok(SortKey::CreatedAt),
            "recency" | "id" => Ok(SortKey::Recency),
            other => Err(ValidationError::InvalidValue {
                field: "key".to_string(),
                message: format!(
                    "unknown sort key '{other}' \
                     (expected one of: importance, time, name, createdAt, recency)"
                ),
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl From<bool> for SortDirection {
    fn from(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(ValidationError::InvalidValue {
                field: "direction".to_string(),
                message: format!("unknown sort direction '{other}' (expected asc or desc)"),
            }),
        }
    }
}

/// Numeric comparison where `-0.0` and `0.0` tie.
fn compare_values(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Return a stably sorted copy of `tasks`.
pub fn order(tasks: &[Task], key: SortKey, ascending: bool) -> Vec<Task> {
    order_by(tasks, key, SortDirection::from(ascending))
}

/// Return a stably sorted copy of `tasks` in the given direction.
pub fn order_by(tasks: &[Task], key: SortKey, direction: SortDirection) -> Vec<Task> {
    let refs: Vec<&Task> = tasks.iter().collect();
    merge_sort(&refs, &|a: &Task, b: &Task| direction.apply(key.compare(a, b)))
        .into_iter()
        .cloned()
        .collect()
}

fn merge_sort<'a, F>(items: &[&'a Task], compare: &F) -> Vec<&'a Task>
where
    F: Fn(&Task, &Task) -> Ordering,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let mid = items.len() / 2;
    let left = merge_sort(&items[..mid], compare);
    let right = merge_sort(&items[mid..], compare);
    merge(left, right, compare)
}

fn merge<'a, F>(left: Vec<&'a Task>, right: Vec<&'a Task>, compare: &F) -> Vec<&'a Task>
where
    F: Fn(&Task, &Task) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Right wins only when strictly smaller.
        if compare(*r, *l) == Ordering::Less {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
