//! Startup import of goals, tasks and the visible week from the REST API.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::models::settings::Settings;
use crate::services::api::CalendarApi;
use crate::services::store::{seeded_state, CalendarState, Command, EventStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub goals: usize,
    pub tasks: usize,
    pub events_received: usize,
    pub events_added: usize,
}

/// Loads the catalog and the events of the selected week into `store`.
///
/// Nothing is dispatched unless every request succeeds.
pub fn import_visible_week(
    api: &dyn CalendarApi,
    store: &mut EventStore,
    first_day_of_week: u8,
) -> Result<ImportSummary> {
    let days = store.state().week_days(first_day_of_week);
    let (first, last) = (days[0], days[6]);

    let goals = api.fetch_goals().context("Failed to fetch goals")?;
    let tasks = api.fetch_tasks().context("Failed to fetch tasks")?;
    let events = api
        .fetch_events_in_range(first, last)
        .with_context(|| format!("Failed to fetch events for {} .. {}", first, last))?;

    let before = store.state().events.len();
    let mut summary = ImportSummary {
        goals: goals.len(),
        tasks: tasks.len(),
        events_received: events.len(),
        events_added: 0,
    };

    store.dispatch(Command::LoadCatalog { goals, tasks });
    store.dispatch(Command::ImportEvents(events));
    summary.events_added = store.state().events.len() - before;

    log::info!(
        "Imported {} goals, {} tasks and {}/{} events for week of {}",
        summary.goals,
        summary.tasks,
        summary.events_added,
        summary.events_received,
        first
    );
    Ok(summary)
}

/// Store the application starts with.
///
/// Imports from `api` when `load_from_api` is set; otherwise, or when the
/// import fails, starts from the sample data (or empty when seeding is off).
pub fn initial_store(settings: &Settings, api: Option<&dyn CalendarApi>, today: NaiveDate) -> EventStore {
    if settings.load_from_api {
        if let Some(api) = api {
            let mut store = EventStore::new(CalendarState::new(today));
            match import_visible_week(api, &mut store, settings.first_day_of_week) {
                Ok(_) => return store,
                Err(e) => log::warn!("API import failed: {:#}, falling back to local data", e),
            }
        }
    }

    if settings.seed_sample_data {
        EventStore::new(seeded_state(today))
    } else {
        EventStore::new(CalendarState::new(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::Rgb;
    use crate::models::event::{CalendarEvent, EventCategory};
    use crate::models::goal::{Goal, Task};
    use crate::services::api::MockCalendarApi;
    use anyhow::anyhow;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn remote_event(id: &str) -> CalendarEvent {
        CalendarEvent::builder()
            .id(id)
            .title("Remote")
            .category(EventCategory::Social)
            .start(day(8).and_hms_opt(18, 0, 0).unwrap())
            .end(day(8).and_hms_opt(19, 0, 0).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_import_loads_catalog_and_week() {
        let mut api = MockCalendarApi::new();
        api.expect_fetch_goals()
            .returning(|| Ok(vec![Goal::new("g1", "Learn", Rgb::new(1, 1, 1))]));
        api.expect_fetch_tasks()
            .returning(|| Ok(vec![Task::new("t1", "MLE", "g1", Rgb::new(1, 1, 1))]));
        api.expect_fetch_events_in_range()
            .with(eq(day(5)), eq(day(11)))
            .times(1)
            .returning(|_, _| Ok(vec![remote_event("r1"), remote_event("r2")]));

        let mut store = EventStore::new(CalendarState::new(day(8)));
        let summary = import_visible_week(&api, &mut store, 0).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                goals: 1,
                tasks: 1,
                events_received: 2,
                events_added: 2,
            }
        );
        assert_eq!(store.state().goals.len(), 1);
        assert!(store.state().event("r2").is_some());
    }

    #[test]
    fn test_import_failure_leaves_store_untouched() {
        let mut api = MockCalendarApi::new();
        api.expect_fetch_goals().returning(|| Ok(Vec::new()));
        api.expect_fetch_tasks().returning(|| Err(anyhow!("connection refused")));
        api.expect_fetch_events_in_range().never();

        let mut store = EventStore::new(CalendarState::new(day(8)));
        let err = import_visible_week(&api, &mut store, 0).unwrap_err();

        assert!(err.to_string().contains("Failed to fetch tasks"));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_initial_store_without_api_is_seeded() {
        let store = initial_store(&Settings::default(), None, day(8));
        assert_eq!(store.state().events.len(), 6);
        assert_eq!(store.state().goals.len(), 3);
    }

    #[test]
    fn test_initial_store_falls_back_on_api_error() {
        let mut api = MockCalendarApi::new();
        api.expect_fetch_goals().returning(|| Err(anyhow!("timeout")));

        let settings = Settings {
            load_from_api: true,
            ..Settings::default()
        };
        let store = initial_store(&settings, Some(&api), day(8));
        assert_eq!(store.state().events.len(), 6);
    }

    #[test]
    fn test_initial_store_empty_without_seed() {
        let settings = Settings {
            seed_sample_data: false,
            ..Settings::default()
        };
        let store = initial_store(&settings, None, day(8));
        assert!(store.state().events.is_empty());
        assert!(store.state().tasks.is_empty());
    }

    #[test]
    fn test_initial_store_uses_api_data() {
        let mut api = MockCalendarApi::new();
        api.expect_fetch_goals().returning(|| Ok(Vec::new()));
        api.expect_fetch_tasks().returning(|| Ok(Vec::new()));
        api.expect_fetch_events_in_range()
            .returning(|_, _| Ok(vec![remote_event("r1")]));

        let settings = Settings {
            load_from_api: true,
            ..Settings::default()
        };
        let store = initial_store(&settings, Some(&api), day(8));
        assert_eq!(store.state().events.len(), 1);
        assert!(store.state().goals.is_empty());
    }
}
