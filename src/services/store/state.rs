use chrono::{Duration, NaiveDate};
use std::collections::HashSet;
use std::sync::Arc;

use super::command::Command;
use crate::models::event::{CalendarEvent, EventCategory};
use crate::models::goal::{tasks_for_goal, Goal, Task};
use crate::models::ui::UiSelection;
use crate::utils::date::days_of_week;

/// Immutable snapshot of everything the calendar shows.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    pub events: Vec<CalendarEvent>,
    pub goals: Vec<Goal>,
    pub tasks: Vec<Task>,
    pub selection: UiSelection,
}

impl CalendarState {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            events: Vec::new(),
            goals: Vec::new(),
            tasks: Vec::new(),
            selection: UiSelection::new(selected_date),
        }
    }

    pub fn event(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks of the selected goal, in catalog order. Empty with no goal selected.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        match &self.selection.selected_goal {
            Some(goal_id) => tasks_for_goal(&self.tasks, goal_id),
            None => Vec::new(),
        }
    }

    /// The visible week around the selected date.
    pub fn week_days(&self, first_day_of_week: u8) -> [NaiveDate; 7] {
        days_of_week(self.selection.selected_date, first_day_of_week)
    }

    /// Applies `command`, returning the next state or `None` when nothing changes.
    pub fn apply(&self, command: Command) -> Option<CalendarState> {
        match command {
            Command::AddEvent(event) => {
                if let Err(err) = event.validate() {
                    log::warn!("Ignoring AddEvent for '{}': {}", event.title, err);
                    return None;
                }
                if self.event(&event.id).is_some() {
                    log::warn!("Ignoring AddEvent with duplicate id {}", event.id);
                    return None;
                }
                let mut next = self.clone();
                next.events.push(event);
                Some(next)
            }
            Command::UpdateEvent(event) => {
                let index = self.events.iter().position(|e| e.id == event.id);
                let Some(index) = index else {
                    log::debug!("UpdateEvent: no event with id '{}'", event.id);
                    return None;
                };
                if let Err(err) = event.validate_times() {
                    log::warn!("Ignoring UpdateEvent for {}: {}", event.id, err);
                    return None;
                }
                let mut next = self.clone();
                next.events[index] = event;
                Some(next)
            }
            Command::DeleteEvent(id) => {
                let index = self.events.iter().position(|e| e.id == id);
                let Some(index) = index else {
                    log::debug!("DeleteEvent: no event with id '{}'", id);
                    return None;
                };
                let mut next = self.clone();
                next.events.remove(index);
                Some(next)
            }
            Command::MoveEvent {
                id,
                day_delta,
                minute_delta,
            } => {
                if day_delta == 0 && minute_delta == 0 {
                    return None;
                }
                let Some(index) = self.events.iter().position(|e| e.id == id) else {
                    log::debug!("MoveEvent: no event with id '{}'", id);
                    return None;
                };
                let Some(moved) = self.events[index].shifted(day_delta, minute_delta) else {
                    log::debug!(
                        "MoveEvent: shifting '{}' by {}d {}m leaves the representable range",
                        id,
                        day_delta,
                        minute_delta
                    );
                    return None;
                };
                let mut next = self.clone();
                next.events[index] = moved;
                Some(next)
            }
            Command::SetSelectedDate(date) => {
                if self.selection.selected_date == date {
                    return None;
                }
                let mut next = self.clone();
                next.selection.selected_date = date;
                Some(next)
            }
            Command::OpenModal(slot) => {
                let mut next = self.clone();
                next.selection.modal_open = true;
                next.selection.editing_event = None;
                next.selection.clicked_time_slot = slot;
                Some(next)
            }
            Command::CloseModal => {
                let selection = &self.selection;
                if !selection.modal_open
                    && selection.editing_event.is_none()
                    && selection.clicked_time_slot.is_none()
                {
                    return None;
                }
                let mut next = self.clone();
                next.selection.modal_open = false;
                next.selection.editing_event = None;
                next.selection.clicked_time_slot = None;
                Some(next)
            }
            Command::EditEvent(event) => {
                let mut next = self.clone();
                next.selection.editing_event = Some(event);
                next.selection.modal_open = true;
                Some(next)
            }
            Command::SelectGoal(goal_id) => {
                if self.selection.selected_goal.as_deref() == Some(goal_id.as_str()) {
                    return None;
                }
                let mut next = self.clone();
                next.selection.selected_goal = Some(goal_id);
                Some(next)
            }
            Command::CreateEventFromTask { task_id, slot } => {
                let Some(task) = self.task(&task_id) else {
                    log::debug!("CreateEventFromTask: no task with id '{}'", task_id);
                    return None;
                };
                let start = slot.start();
                let draft = CalendarEvent::draft(
                    task.title.clone(),
                    EventCategory::Work,
                    start,
                    start + Duration::hours(1),
                    Some(task.color),
                );
                let mut next = self.clone();
                next.selection.clicked_time_slot = Some(slot);
                next.selection.modal_open = true;
                next.selection.editing_event = Some(draft);
                Some(next)
            }
            Command::LoadCatalog { goals, tasks } => {
                let mut next = self.clone();
                next.goals = goals;
                next.tasks = tasks;
                Some(next)
            }
            Command::ImportEvents(events) => {
                let mut known: HashSet<String> = self.events.iter().map(|e| e.id.clone()).collect();
                let mut accepted = Vec::new();
                for event in events {
                    if let Err(err) = event.validate() {
                        log::warn!("Skipping imported event '{}': {}", event.title, err);
                        continue;
                    }
                    if !known.insert(event.id.clone()) {
                        log::debug!("Skipping already known event {}", event.id);
                        continue;
                    }
                    accepted.push(event);
                }
                if accepted.is_empty() {
                    return None;
                }
                let mut next = self.clone();
                next.events.extend(accepted);
                Some(next)
            }
        }
    }
}

/// Pure `(state, command) -> state` transition.
///
/// Returns the same `Arc` when the command changes nothing, so callers can
/// detect no-ops with `Arc::ptr_eq`.
pub fn reduce(state: &Arc<CalendarState>, command: Command) -> Arc<CalendarState> {
    match state.apply(command) {
        Some(next) => Arc::new(next),
        None => Arc::clone(state),
    }
}
