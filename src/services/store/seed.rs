//! Sample data the planner starts with when no API import is configured.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::state::CalendarState;
use crate::models::event::{CalendarEvent, EventCategory};
use crate::models::goal::{default_goals, default_tasks};

fn at(day: NaiveDate, day_offset: i64, hour: u32, minute: u32) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    (day + Duration::days(day_offset)).and_time(time)
}

/// Sample events laid out around `today`.
pub fn sample_events(today: NaiveDate) -> Vec<CalendarEvent> {
    let sample = |id: &str, title: &str, category, start, end| CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        category,
        start,
        end,
        color: None,
    };

    vec![
        sample("1", "Morning Exercise", EventCategory::Exercise, at(today, 0, 7, 0), at(today, 0, 8, 0)),
        sample("2", "Team Meeting", EventCategory::Work, at(today, 0, 10, 0), at(today, 0, 11, 30)),
        sample("3", "Lunch Break", EventCategory::Eating, at(today, 1, 12, 0), at(today, 1, 13, 0)),
        sample("4", "Family Dinner", EventCategory::Family, at(today, 2, 18, 0), at(today, 2, 19, 30)),
        sample("5", "Quick Check-in", EventCategory::Work, at(today, 0, 8, 15), at(today, 0, 8, 30)),
        sample("6", "15-min Update", EventCategory::Work, at(today, 0, 14, 0), at(today, 0, 14, 15)),
    ]
}

/// Sample events, goals and tasks with `today` selected.
pub fn seeded_state(today: NaiveDate) -> CalendarState {
    CalendarState {
        events: sample_events(today),
        goals: default_goals(),
        tasks: default_tasks(),
        ..CalendarState::new(today)
    }
}
