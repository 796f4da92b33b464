//! Task records as supplied by the presentation layer.
//!
//! Tasks are created, completed, and removed by the caller. Selection and
//! ordering only read them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier assigned by the caller at creation time.
///
/// Ids grow with creation order, so a larger id is a newer task.
pub type TaskId = u64;

/// A candidate task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task id
    pub id: TaskId,
    /// Descriptive name
    pub name: String,
    /// Value score used by the selector
    pub importance: f64,
    /// Time cost; floored to whole units when consumed from a budget
    pub time: f64,
    /// Whether the task is completed
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new pending task stamped with the current time.
    pub fn new(id: TaskId, name: impl Into<String>, importance: f64, time: f64) -> Self {
        Task {
            id,
            name: name.into(),
            importance,
            time,
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Set the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the completed flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Whole budget units this task consumes.
    ///
    /// 1.9 and 1.1 both cost 1.
    pub fn cost(&self) -> i64 {
        self.time.floor() as i64
    }

    /// Reject values that would corrupt comparisons or table sizing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_finite("importance", self.importance)?;
        ValidationError::require_finite("time", self.time)?;
        if self.time < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "time".to_string(),
                message: format!("task {} has negative time {}", self.id, self.time),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn task_creation() {
        let task = Task::new(7, "Write report", 10.0, 45.0);
        assert_eq!(task.id, 7);
        assert_eq!(task.name, "Write report");
        assert!(!task.completed);
    }

    #[test]
    fn cost_truncates_fractional_time() {
        assert_eq!(Task::new(1, "a", 1.0, 1.9).cost(), 1);
        assert_eq!(Task::new(2, "b", 1.0, 1.1).cost(), 1);
        assert_eq!(Task::new(3, "c", 1.0, 0.5).cost(), 0);
        assert_eq!(Task::new(4, "d", 1.0, 30.0).cost(), 30);
    }

    #[test]
    fn validate_rejects_non_finite_and_negative_values() {
        assert!(Task::new(1, "ok", 3.0, 2.0).validate().is_ok());
        assert!(Task::new(1, "neg importance", -3.0, 2.0).validate().is_ok());
        assert!(Task::new(1, "nan", f64::NAN, 2.0).validate().is_err());
        assert!(Task::new(1, "inf", 1.0, f64::INFINITY).validate().is_err());

        let err = Task::new(9, "negative", 1.0, -0.5).validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "time"));
    }

    #[test]
    fn task_serialization_uses_camel_case() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let task = Task::new(1, "Plan sprint", 20.0, 30.0).with_created_at(created);

        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());

        let decoded: Task = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn task_deserialization_defaults_optional_fields() {
        let task: Task =
            serde_json::from_str(r#"{"id": 3, "name": "Inbox", "importance": 5, "time": 1.5}"#)
                .unwrap();
        assert_eq!(task.importance, 5.0);
        assert_eq!(task.cost(), 1);
        assert!(!task.completed);
    }
}
