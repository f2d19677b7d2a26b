// Test fixtures - reusable test data
// Provides consistent dates and events across the integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use week_planner::models::event::{CalendarEvent, EventCategory};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Jan 6, 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    /// Monday, Dec 30, 2024 (week spans the new year)
    pub fn year_boundary() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()
    }

    pub fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        day.and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Builds a committed event; panics on invalid input.
    pub fn event(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::builder()
            .id(id)
            .title(format!("Event {}", id))
            .category(EventCategory::Work)
            .start(start)
            .end(end)
            .build()
            .expect("fixture event must be valid")
    }

    /// 10:00 to 10:30 on Monday
    pub fn half_hour_meeting() -> CalendarEvent {
        event(
            "meeting",
            dates::at(dates::monday(), 10, 0),
            dates::at(dates::monday(), 10, 30),
        )
    }
}
