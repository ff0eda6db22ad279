//! Mutation operations and screen-level queries. Every operation is
//! load → transform → save against the whole collection, with no cache in
//! between; the public wrappers resolve the default store and scheduler
//! from the environment, the `*_with` forms take them explicitly.

use crate::datetime;
use crate::error::AppError;
use crate::model::{Priority, Task, TaskStatus};
use crate::notify::{ReminderRequest, ReminderScheduler, scheduler_from_env};
use crate::prefs;
use crate::storage::kv::{FileKvStore, KvStore};
use crate::storage::task_store;
use crate::view::{self, DateMarker, SortKey, StatusFilter};
use std::collections::BTreeMap;
use time::OffsetDateTime;

#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub priority: Priority,
}

/// Partial update; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone)]
pub struct DayView {
    pub date_key: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct HomeSummary {
    pub display_name: Option<String>,
    pub total: usize,
    pub due_today: Vec<Task>,
    pub high_priority: Vec<Task>,
}

pub fn add_task(fields: NewTask) -> Result<Task, AppError> {
    let store = FileKvStore::from_env()?;
    add_task_with(&store, scheduler_from_env().as_ref(), fields)
}

pub fn update_task(id: &str, patch: TaskPatch) -> Result<Option<Task>, AppError> {
    let store = FileKvStore::from_env()?;
    update_task_with(&store, scheduler_from_env().as_ref(), id, patch)
}

pub fn toggle_status(id: &str) -> Result<Option<Task>, AppError> {
    let store = FileKvStore::from_env()?;
    Ok(toggle_status_with(&store, id))
}

pub fn delete_task(id: &str) -> Result<Option<Task>, AppError> {
    let store = FileKvStore::from_env()?;
    Ok(delete_task_with(&store, id))
}

pub fn set_notifications_enabled(enabled: bool) -> Result<(), AppError> {
    let store = FileKvStore::from_env()?;
    set_notifications_enabled_with(&store, scheduler_from_env().as_ref(), enabled);
    Ok(())
}

pub fn list_tasks(filter: StatusFilter, sort: SortKey) -> Result<Vec<Task>, AppError> {
    let store = FileKvStore::from_env()?;
    Ok(list_tasks_with(&store, filter, sort))
}

pub fn tasks_for_date(date: Option<&str>, filter: StatusFilter) -> Result<DayView, AppError> {
    let store = FileKvStore::from_env()?;
    Ok(tasks_for_date_with(&store, date, filter))
}

pub fn home_summary() -> Result<HomeSummary, AppError> {
    let store = FileKvStore::from_env()?;
    Ok(home_summary_with(&store))
}

pub fn calendar_markers() -> Result<BTreeMap<String, Vec<DateMarker>>, AppError> {
    let store = FileKvStore::from_env()?;
    Ok(view::group_by_due_date(&task_store::load(&store)))
}

pub fn get_task(id: &str) -> Result<Option<Task>, AppError> {
    let store = FileKvStore::from_env()?;
    Ok(get_task_with(&store, id))
}

pub fn export_json() -> Result<String, AppError> {
    let store = FileKvStore::from_env()?;
    Ok(export_json_with(&store))
}

pub fn add_task_with(
    store: &dyn KvStore,
    scheduler: &dyn ReminderScheduler,
    fields: NewTask,
) -> Result<Task, AppError> {
    let title = fields.title.trim();
    if title.is_empty() {
        return Err(AppError::empty_title());
    }

    let now = datetime::now_local();
    let today = now.date();
    let due_date = match fields.due_date.as_deref() {
        Some(raw) if !raw.trim().is_empty() => datetime::canonicalize(raw, today),
        _ => datetime::date_key(today),
    };

    let task = Task {
        id: (now.unix_timestamp_nanos() / 1_000_000).to_string(),
        title: title.to_string(),
        description: fields.description,
        due_date,
        status: TaskStatus::Pending,
        priority: fields.priority,
    };

    let mut tasks = task_store::load(store);
    tasks.push(task.clone());
    if task_store::save(store, &tasks) {
        maybe_schedule_reminder(store, scheduler, &task, now);
    }

    Ok(task)
}

pub fn update_task_with(
    store: &dyn KvStore,
    scheduler: &dyn ReminderScheduler,
    id: &str,
    patch: TaskPatch,
) -> Result<Option<Task>, AppError> {
    let trimmed_id = id.trim();

    let title = match patch.title.as_deref() {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(AppError::empty_title());
            }
            Some(trimmed.to_string())
        }
        None => None,
    };

    let now = datetime::now_local();
    let today = now.date();
    let mut tasks = task_store::load(store);
    let mut updated_task = None;

    for task in &mut tasks {
        if task.id == trimmed_id {
            if let Some(title) = &title {
                task.title = title.clone();
            }
            if let Some(description) = &patch.description {
                task.description = description.clone();
            }
            if let Some(due) = patch.due_date.as_deref() {
                task.due_date = datetime::canonicalize(due, today);
            }
            if let Some(status) = patch.status {
                task.status = status;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            updated_task = Some(task.clone());
            break;
        }
    }

    let Some(updated) = updated_task else {
        log::debug!("update for unknown task {trimmed_id} ignored");
        return Ok(None);
    };

    if task_store::save(store, &tasks) {
        maybe_schedule_reminder(store, scheduler, &updated, now);
    }

    Ok(Some(updated))
}

pub fn toggle_status_with(store: &dyn KvStore, id: &str) -> Option<Task> {
    let trimmed_id = id.trim();
    let mut tasks = task_store::load(store);
    let mut toggled = None;

    for task in &mut tasks {
        if task.id == trimmed_id {
            task.status = match task.status {
                TaskStatus::Pending => TaskStatus::Completed,
                TaskStatus::Completed => TaskStatus::Pending,
            };
            toggled = Some(task.clone());
            break;
        }
    }

    let toggled = toggled?;
    task_store::save(store, &tasks);
    Some(toggled)
}

pub fn delete_task_with(store: &dyn KvStore, id: &str) -> Option<Task> {
    let trimmed_id = id.trim();
    let mut tasks = task_store::load(store);

    let index = tasks.iter().position(|task| task.id == trimmed_id)?;
    let removed = tasks.remove(index);
    task_store::save(store, &tasks);

    Some(removed)
}

/// Persist the notifications flag and reconcile outstanding reminders:
/// enabling schedules one per pending task, disabling asks the bridge to
/// cancel whatever it can.
pub fn set_notifications_enabled_with(
    store: &dyn KvStore,
    scheduler: &dyn ReminderScheduler,
    enabled: bool,
) {
    prefs::set_notifications_flag(store, enabled);

    if enabled {
        let now = datetime::now_local();
        let tasks = task_store::load(store);
        for task in tasks.iter().filter(|task| task.status == TaskStatus::Pending) {
            schedule_reminder(scheduler, task, now);
        }
    } else if let Err(err) = scheduler.cancel_all() {
        log::warn!("outstanding reminders were not cancelled: {err}");
    }
}

pub fn list_tasks_with(store: &dyn KvStore, filter: StatusFilter, sort: SortKey) -> Vec<Task> {
    let tasks = task_store::load(store);
    let filtered = view::filter_by_status(&tasks, filter);
    view::sort_by(&filtered, sort, datetime::now_local().date())
}

pub fn tasks_for_date_with(
    store: &dyn KvStore,
    date: Option<&str>,
    filter: StatusFilter,
) -> DayView {
    let today = datetime::now_local().date();
    let date_key = match date {
        Some(raw) if !raw.trim().is_empty() => {
            datetime::due_date_key(&datetime::canonicalize(raw, today)).to_string()
        }
        _ => datetime::date_key(today),
    };

    let tasks = task_store::load(store);
    let for_date = view::filter_by_date(&tasks, &date_key);
    DayView {
        date_key,
        tasks: view::filter_by_status(&for_date, filter),
    }
}

pub fn home_summary_with(store: &dyn KvStore) -> HomeSummary {
    let tasks = task_store::load(store);
    let today = datetime::now_local().date();

    HomeSummary {
        display_name: prefs::load(store).display_name,
        total: tasks.len(),
        due_today: view::due_today(&tasks, today),
        high_priority: view::high_priority_pending(&tasks),
    }
}

pub fn get_task_with(store: &dyn KvStore, id: &str) -> Option<Task> {
    let trimmed_id = id.trim();
    task_store::load(store)
        .into_iter()
        .find(|task| task.id == trimmed_id)
}

/// The share/export pass-through: the collection, pretty-printed.
pub fn export_json_with(store: &dyn KvStore) -> String {
    let tasks = task_store::load(store);
    match serde_json::to_string_pretty(&tasks) {
        Ok(payload) => payload,
        Err(err) => {
            log::error!("task collection failed to serialize for export: {err}");
            "[]".to_string()
        }
    }
}

/// High-priority mutations raise a reminder once the write has landed,
/// provided the user opted in. Failures stay on this side of the bridge.
fn maybe_schedule_reminder(
    store: &dyn KvStore,
    scheduler: &dyn ReminderScheduler,
    task: &Task,
    now: OffsetDateTime,
) {
    if task.priority != Priority::High {
        return;
    }
    if !prefs::load(store).notifications_enabled {
        return;
    }
    schedule_reminder(scheduler, task, now);
}

fn schedule_reminder(scheduler: &dyn ReminderScheduler, task: &Task, now: OffsetDateTime) {
    let request = ReminderRequest {
        title: task.title.clone(),
        fire_at: datetime::fire_instant(&task.due_date, now),
        correlation_id: task.id.clone(),
    };
    if let Err(err) = scheduler.schedule(&request) {
        log::warn!("reminder for task {} not scheduled: {err}", task.id);
    }
}
