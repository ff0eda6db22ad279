use crate::error::AppError;
use crate::notify::{REMINDER_SUMMARY, ReminderRequest, ReminderScheduler, reminder_delay};
use notify_rust::Notification;
use time::OffsetDateTime;

pub struct LinuxScheduler;

impl ReminderScheduler for LinuxScheduler {
    fn schedule(&self, request: &ReminderRequest) -> Result<(), AppError> {
        let delay = reminder_delay(request.fire_at, OffsetDateTime::now_utc());
        let body = request.body();
        let correlation_id = request.correlation_id.clone();

        std::thread::spawn(move || {
            std::thread::sleep(delay);
            let shown = Notification::new()
                .summary(REMINDER_SUMMARY)
                .body(&body)
                .show();
            if let Err(err) = shown {
                log::warn!("reminder {correlation_id} failed to display: {err}");
            }
        });

        Ok(())
    }

    fn cancel_all(&self) -> Result<(), AppError> {
        // Dispatched reminder threads are detached and cannot be revoked.
        log::debug!("cancel_all: pending desktop reminders cannot be revoked");
        Ok(())
    }
}
