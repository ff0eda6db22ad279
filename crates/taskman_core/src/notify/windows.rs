use crate::error::AppError;
use crate::notify::{REMINDER_SUMMARY, ReminderRequest, ReminderScheduler, reminder_delay};
use tauri_winrt_notification::Toast;
use time::OffsetDateTime;

pub struct WindowsScheduler;

impl ReminderScheduler for WindowsScheduler {
    fn schedule(&self, request: &ReminderRequest) -> Result<(), AppError> {
        let delay = reminder_delay(request.fire_at, OffsetDateTime::now_utc());
        let body = request.body();
        let correlation_id = request.correlation_id.clone();

        std::thread::spawn(move || {
            std::thread::sleep(delay);
            let shown = Toast::new(Toast::POWERSHELL_APP_ID)
                .title(REMINDER_SUMMARY)
                .text1(&body)
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
