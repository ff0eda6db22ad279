use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// Only the literal `completed` means completed; everything else a stored
/// record may carry reads as pending.
pub fn normalize_status(raw: &str) -> TaskStatus {
    if raw == "completed" {
        TaskStatus::Completed
    } else {
        TaskStatus::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Severity rank used for sorting: low(1) < medium(2) < high(3).
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A single to-do record. Serialized in camelCase to match the persisted
/// collection layout; `status` and `priority` decode leniently because stored
/// records may carry arbitrary values in those fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default, deserialize_with = "status_or_pending")]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "priority_or_medium")]
    pub priority: Priority,
}

fn status_or_pending<'de, D>(deserializer: D) -> Result<TaskStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(normalize_status).unwrap_or_default())
}

fn priority_or_medium<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
        Some("low") => Priority::Low,
        Some("high") => Priority::High,
        _ => Priority::Medium,
    })
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskStatus, normalize_status};

    #[test]
    fn normalize_status_is_idempotent_and_total() {
        for raw in ["completed", "pending", "done", "", "COMPLETED", "42"] {
            let once = normalize_status(raw);
            let twice = normalize_status(once.label());
            assert_eq!(once, twice);
            assert!(matches!(once, TaskStatus::Pending | TaskStatus::Completed));
        }
        assert_eq!(normalize_status("completed"), TaskStatus::Completed);
        assert_eq!(normalize_status("anything else"), TaskStatus::Pending);
    }

    #[test]
    fn task_serializes_in_camel_case() {
        let task = Task {
            id: "1748771234567".to_string(),
            title: "demo".to_string(),
            description: String::new(),
            due_date: "01-06-2025".to_string(),
            status: TaskStatus::Pending,
            priority: Priority::High,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "01-06-2025");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["priority"], "high");
    }

    #[test]
    fn unknown_status_coerces_to_pending() {
        let task: Task = serde_json::from_str(
            r#"{"id":"1","title":"demo","dueDate":"01-06-2025","status":"in_progress","priority":"low"}"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn non_string_status_and_priority_coerce_to_defaults() {
        let task: Task = serde_json::from_str(
            r#"{"id":"1","title":"demo","dueDate":"01-06-2025","status":7,"priority":null}"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"1","title":"demo"}"#).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.due_date, "");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
    }
}
