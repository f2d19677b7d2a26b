// Date utility functions
// Week boundaries and display formatting

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// The seven consecutive dates of the week containing `anchor`.
///
/// Always recomputed from the anchor; callers must not cache the result
/// across anchor changes.
pub fn days_of_week(anchor: NaiveDate, first_day_of_week: u8) -> [NaiveDate; 7] {
    let start = get_week_start(anchor, first_day_of_week);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// "h:mm AM" for the 12h clock, "HH:MM" for 24h.
pub fn format_time(time: NaiveTime, use_24h: bool) -> String {
    if use_24h {
        time.format("%H:%M").to_string()
    } else {
        time.format("%-I:%M %p").to_string()
    }
}

/// Row label for an hour of the grid ("12 AM", "1 PM" or "13:00").
pub fn format_hour_label(hour: u32, use_24h: bool) -> String {
    if use_24h {
        return format!("{:02}:00", hour);
    }
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

/// "Monday, January 6, 2025"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "January 2025"
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Current time floored to the slot grid, as (hour, minute).
pub fn floor_to_slot(time: NaiveTime, slot_minutes: u32) -> (u32, u32) {
    let step = slot_minutes.max(1);
    (time.hour(), time.minute() / step * step)
}
