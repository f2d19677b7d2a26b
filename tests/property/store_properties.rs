// Property-based tests for week geometry and store commands
// Exercises the invariants with random dates, deltas and command sequences

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use std::sync::Arc;

use week_planner::models::event::{CalendarEvent, EventCategory};
use week_planner::services::store::{reduce, CalendarState, Command};
use week_planner::utils::date::days_of_week;
use week_planner::utils::geometry::{events_on_day, slot_at_offset, GridMetrics};

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..20_000).prop_map(|offset| NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Duration::days(offset))
}

fn any_event(id: usize) -> impl Strategy<Value = CalendarEvent> {
    (0i64..7, 0i64..1440, 1i64..600).prop_map(move |(day, minute, length)| {
        let start: NaiveDateTime = (base_day() + Duration::days(day)).and_hms_opt(0, 0, 0).unwrap()
            + Duration::minutes(minute);
        CalendarEvent {
            id: format!("e{}", id),
            title: format!("Event {}", id),
            category: EventCategory::Work,
            start,
            end: start + Duration::minutes(length),
            color: None,
        }
    })
}

fn any_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (0usize..6, -3i64..4, -900i64..900).prop_map(|(id, day_delta, minute_delta)| Command::MoveEvent {
            id: format!("e{}", id),
            day_delta,
            minute_delta,
        }),
        (0usize..6).prop_map(|id| Command::DeleteEvent(format!("e{}", id))),
        (0usize..6, -600i64..600).prop_map(|(id, end_shift)| {
            let start = base_day().and_hms_opt(9, 0, 0).unwrap();
            Command::UpdateEvent(CalendarEvent {
                id: format!("e{}", id),
                title: "Updated".to_string(),
                category: EventCategory::Relax,
                start,
                end: start + Duration::minutes(end_shift),
                color: None,
            })
        }),
        (6usize..10, -60i64..120).prop_map(|(id, length)| {
            let start = base_day().and_hms_opt(13, 0, 0).unwrap();
            Command::AddEvent(CalendarEvent {
                id: format!("e{}", id),
                title: "Added".to_string(),
                category: EventCategory::Social,
                start,
                end: start + Duration::minutes(length),
                color: None,
            })
        }),
    ]
}

fn any_state() -> impl Strategy<Value = CalendarState> {
    (any_event(0), any_event(1), any_event(2), any_event(3)).prop_map(|(a, b, c, d)| {
        let mut state = CalendarState::new(base_day());
        state.events = vec![a, b, c, d];
        state
    })
}

proptest! {
    /// The visible week is seven consecutive days starting on the configured weekday.
    #[test]
    fn prop_week_is_seven_consecutive_days(anchor in any_date(), first_day in 0u8..7) {
        let days = days_of_week(anchor, first_day);

        prop_assert_eq!(days[0].weekday().num_days_from_sunday(), first_day as u32);
        for pair in days.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        prop_assert!(days.contains(&anchor));
    }

    /// Moving an event never changes its duration.
    #[test]
    fn prop_move_preserves_duration(event in any_event(0), day_delta in -30i64..30, minute_delta in -5000i64..5000) {
        let mut state = CalendarState::new(base_day());
        state.events.push(event.clone());
        let state = Arc::new(state);

        let next = reduce(&state, Command::MoveEvent { id: event.id.clone(), day_delta, minute_delta });
        let moved = next.event(&event.id).unwrap();

        prop_assert_eq!(moved.duration(), event.duration());
        prop_assert_eq!(moved.start, event.start + Duration::days(day_delta) + Duration::minutes(minute_delta));
    }

    /// Moves of any size either shift the event or leave the snapshot alone.
    #[test]
    fn prop_any_move_is_total(event in any_event(0), day_delta in any::<i64>(), minute_delta in any::<i64>()) {
        let mut state = CalendarState::new(base_day());
        state.events.push(event.clone());
        let state = Arc::new(state);

        let next = reduce(&state, Command::MoveEvent { id: event.id.clone(), day_delta, minute_delta });
        let moved = next.event(&event.id).unwrap();

        prop_assert_eq!(moved.duration(), event.duration());
        if Arc::ptr_eq(&state, &next) {
            prop_assert_eq!(moved, &event);
        }
    }

    /// Every event keeps `end > start` and a unique id across any command sequence.
    #[test]
    fn prop_commands_keep_events_valid(state in any_state(), commands in prop::collection::vec(any_command(), 0..24)) {
        let mut state = Arc::new(state);
        for command in commands {
            state = reduce(&state, command);
            for event in &state.events {
                prop_assert!(event.end > event.start, "{} has end <= start", event.id);
            }
            let mut ids: Vec<_> = state.events.iter().map(|e| e.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), state.events.len());
        }
    }

    /// Commands on unknown ids leave the snapshot untouched.
    #[test]
    fn prop_unknown_ids_are_no_ops(state in any_state(), day_delta in -3i64..3, minute_delta in -90i64..90) {
        let state = Arc::new(state);
        let missing = "does-not-exist".to_string();

        let moved = reduce(&state, Command::MoveEvent { id: missing.clone(), day_delta, minute_delta });
        let deleted = reduce(&state, Command::DeleteEvent(missing));

        prop_assert!(Arc::ptr_eq(&state, &moved));
        prop_assert!(Arc::ptr_eq(&state, &deleted));
    }

    /// Each event shows up under exactly one day of its week: its start day.
    #[test]
    fn prop_events_partition_by_start_day(state in any_state()) {
        let days = days_of_week(base_day(), 1);
        let mut seen = 0;
        for day in days {
            for event in events_on_day(&state.events, day) {
                prop_assert_eq!(event.start.date(), day);
                seen += 1;
            }
        }
        prop_assert_eq!(seen, state.events.len());
    }

    /// Click and drop offsets always land on a slot boundary inside the day.
    #[test]
    fn prop_slot_lookup_is_quantized(y in -100.0f32..1500.0) {
        let metrics = GridMetrics::default();
        let (hour, minute) = slot_at_offset(y, &metrics);
        prop_assert!(hour < 24);
        prop_assert_eq!(minute % metrics.slot_minutes, 0);
    }
}
