//! Reminder scheduling bridge. Mutation operations hand a request over and
//! move on; whatever the platform does with it never affects persistence.

use crate::error::AppError;
use std::time::Duration;
use time::OffsetDateTime;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::LinuxScheduler;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WindowsScheduler;

pub const REMINDER_SUMMARY: &str = "Task Reminder";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub title: String,
    pub fire_at: OffsetDateTime,
    pub correlation_id: String,
}

impl ReminderRequest {
    pub fn body(&self) -> String {
        format!("Don't forget: {}", self.title)
    }
}

pub trait ReminderScheduler {
    fn schedule(&self, request: &ReminderRequest) -> Result<(), AppError>;

    fn cancel_all(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Delay before a reminder fires: at least one second, even for instants
/// already in the past.
pub fn reminder_delay(fire_at: OffsetDateTime, now: OffsetDateTime) -> Duration {
    let seconds = (fire_at - now).whole_seconds().max(1);
    Duration::from_secs(seconds as u64)
}

pub struct NoopScheduler;

impl ReminderScheduler for NoopScheduler {
    fn schedule(&self, _request: &ReminderRequest) -> Result<(), AppError> {
        Ok(())
    }
}

/// Resolve the scheduler for this process: the no-op one when reminders are
/// disabled via `TASKMAN_DISABLE_NOTIFICATIONS` or unsupported on this
/// platform, the desktop one otherwise.
pub fn scheduler_from_env() -> Box<dyn ReminderScheduler> {
    if std::env::var("TASKMAN_DISABLE_NOTIFICATIONS").is_ok() {
        return Box::new(NoopScheduler);
    }

    match platform_scheduler() {
        Ok(scheduler) => scheduler,
        Err(err) => {
            log::debug!("desktop reminders unavailable: {err}");
            Box::new(NoopScheduler)
        }
    }
}

#[cfg(target_os = "linux")]
pub fn platform_scheduler() -> Result<Box<dyn ReminderScheduler>, AppError> {
    Ok(Box::new(LinuxScheduler))
}

#[cfg(windows)]
pub fn platform_scheduler() -> Result<Box<dyn ReminderScheduler>, AppError> {
    Ok(Box::new(WindowsScheduler))
}

#[cfg(not(any(target_os = "linux", windows)))]
pub fn platform_scheduler() -> Result<Box<dyn ReminderScheduler>, AppError> {
    Err(AppError::invalid_data(
        "reminders are not supported on this platform",
    ))
}
