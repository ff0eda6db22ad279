mod task;

pub use task::{Priority, Task, TaskStatus, normalize_status};
