//! Whole-collection persistence for tasks: every read returns the full
//! collection and every write replaces it. Concurrent writers therefore
//! race at collection granularity and the last save wins; that is accepted
//! single-user behavior, not something this layer guards against.

use crate::model::Task;
use crate::storage::kv::KvStore;

pub const TASKS_KEY: &str = "@tasks";

/// Read the persisted collection. Absent key, unreadable storage, and
/// unparseable payloads all degrade to an empty collection; the caller
/// never sees an error.
pub fn load(store: &dyn KvStore) -> Vec<Task> {
    let raw = match store.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            log::warn!("task collection unreadable, starting empty: {err}");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            log::warn!("stored task payload failed to parse, starting empty: {err}");
            Vec::new()
        }
    }
}

/// Overwrite the persisted collection with `tasks`. Returns whether the
/// write took effect; failures are logged, never raised.
pub fn save(store: &dyn KvStore, tasks: &[Task]) -> bool {
    let payload = match serde_json::to_string(tasks) {
        Ok(payload) => payload,
        Err(err) => {
            log::error!("task collection failed to serialize: {err}");
            return false;
        }
    };

    match store.set(TASKS_KEY, &payload) {
        Ok(()) => true,
        Err(err) => {
            log::error!("task collection not persisted: {err}");
            false
        }
    }
}
