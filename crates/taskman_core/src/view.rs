//! Derived views over the task collection. Every function takes a snapshot
//! slice and returns a new vector; nothing here reads storage or mutates
//! its input, so each screen can derive from its own reload.

use crate::datetime;
use crate::model::{Priority, Task, TaskStatus};
use serde::Serialize;
use std::collections::BTreeMap;
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    Title,
    DueDate,
    Priority,
}

/// One calendar marker contributed by a task to its due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateMarker {
    pub key: String,
    pub color: &'static str,
}

pub fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "#4CAF50",
        Priority::Medium => "#FF9800",
        Priority::High => "#F44336",
    }
}

/// Keep tasks matching `filter`; `All` is the identity, preserving order
/// and elements exactly.
pub fn filter_by_status(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| match filter {
            StatusFilter::All => true,
            StatusFilter::Pending => task.status == TaskStatus::Pending,
            StatusFilter::Completed => task.status == TaskStatus::Completed,
        })
        .cloned()
        .collect()
}

/// Tasks whose due date falls on `date_key`, compared over the first ten
/// characters so timed and untimed entries both match their day.
pub fn filter_by_date(tasks: &[Task], date_key: &str) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| datetime::due_date_key(&task.due_date) == date_key)
        .cloned()
        .collect()
}

/// Reorder by `key`. All sorts are stable, so ties keep their input order
/// and `None` returns the input unchanged.
pub fn sort_by(tasks: &[Task], key: SortKey, today: Date) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    match key {
        SortKey::None => {}
        SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::DueDate => sorted.sort_by_key(|task| datetime::sort_instant(&task.due_date, today)),
        SortKey::Priority => sorted.sort_by_key(|task| task.priority.rank()),
    }
    sorted
}

/// One marker per task under its date key; tasks sharing a date accumulate
/// and are not deduplicated. Tasks without a due date contribute nothing.
pub fn group_by_due_date(tasks: &[Task]) -> BTreeMap<String, Vec<DateMarker>> {
    let mut marks: BTreeMap<String, Vec<DateMarker>> = BTreeMap::new();
    for task in tasks {
        let key = datetime::due_date_key(&task.due_date);
        if key.is_empty() {
            continue;
        }
        marks.entry(key.to_string()).or_default().push(DateMarker {
            key: format!("task-{}", task.id),
            color: priority_color(task.priority),
        });
    }
    marks
}

/// Pending tasks due on `today` — the home screen's top strip.
pub fn due_today(tasks: &[Task], today: Date) -> Vec<Task> {
    let today_key = datetime::date_key(today);
    tasks
        .iter()
        .filter(|task| {
            task.status == TaskStatus::Pending
                && datetime::due_date_key(&task.due_date) == today_key
        })
        .cloned()
        .collect()
}

/// Pending high-priority tasks — the home screen's lower list.
pub fn high_priority_pending(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.priority == Priority::High && task.status == TaskStatus::Pending)
        .cloned()
        .collect()
}
