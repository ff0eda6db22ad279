//! Due-date handling. The canonical layout is `DD-MM-YYYY`, optionally
//! followed by a space and `HH:MM`. Readers also accept the ISO
//! `YYYY-MM-DD` family and the `T`-separated datetime prefix; every write
//! re-emits the canonical layout so the collection converges on one format.
//!
//! Parsing never fails: an unreadable date portion falls back to `today`,
//! an unreadable time portion falls back to no time at all.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Length of the date portion in both accepted layouts.
pub const DATE_KEY_LEN: usize = 10;

const CANONICAL_DATE: &[BorrowedFormatItem<'static>] = format_description!("[day]-[month]-[year]");
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDate {
    pub date: Date,
    pub time: Option<Time>,
}

pub fn parse_due_date(raw: &str, today: Date) -> DueDate {
    let trimmed = raw.trim();
    let (date_part, rest) = match trimmed.get(..DATE_KEY_LEN) {
        Some(head) if trimmed.len() > DATE_KEY_LEN => {
            (head, trimmed[DATE_KEY_LEN..].trim_start_matches([' ', 'T']))
        }
        _ => (trimmed, ""),
    };

    let date = Date::parse(date_part, CANONICAL_DATE)
        .or_else(|_| Date::parse(date_part, ISO_DATE))
        .unwrap_or(today);
    let time = rest.get(..5).and_then(parse_clock);

    DueDate { date, time }
}

fn parse_clock(raw: &str) -> Option<Time> {
    let (hour, minute) = raw.split_once(':')?;
    let hour: u8 = hour.parse().ok()?;
    let minute: u8 = minute.parse().ok()?;
    Time::from_hms(hour, minute, 0).ok()
}

pub fn date_key(date: Date) -> String {
    format!(
        "{:02}-{:02}-{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

pub fn format_due(due: &DueDate) -> String {
    match due.time {
        Some(time) => format!(
            "{} {:02}:{:02}",
            date_key(due.date),
            time.hour(),
            time.minute()
        ),
        None => date_key(due.date),
    }
}

/// Re-emit `raw` in the canonical layout, applying the parse fallbacks.
pub fn canonicalize(raw: &str, today: Date) -> String {
    format_due(&parse_due_date(raw, today))
}

/// The date portion of a stored due date: its first ten characters.
pub fn due_date_key(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.get(..DATE_KEY_LEN).unwrap_or(trimmed)
}

/// The time-of-day portion of a stored due date, empty when absent.
pub fn due_time(raw: &str) -> &str {
    raw.trim().get(DATE_KEY_LEN + 1..).unwrap_or("")
}

/// Chronological sort key; dateless or unparseable entries land on `today`
/// at midnight rather than being excluded.
pub fn sort_instant(raw: &str, today: Date) -> PrimitiveDateTime {
    let due = parse_due_date(raw, today);
    PrimitiveDateTime::new(due.date, due.time.unwrap_or(Time::MIDNIGHT))
}

/// The instant a reminder for `raw` should fire, in the offset of `now`.
pub fn fire_instant(raw: &str, now: OffsetDateTime) -> OffsetDateTime {
    let due = parse_due_date(raw, now.date());
    PrimitiveDateTime::new(due.date, due.time.unwrap_or(Time::MIDNIGHT)).assume_offset(now.offset())
}

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}
