use chrono::NaiveDate;

use crate::models::event::{CalendarEvent, EventId};
use crate::models::goal::{Goal, GoalId, Task, TaskId};
use crate::models::ui::TimeSlot;

/// A named state transition applied by the event store.
///
/// Every command is total: a reference to a missing entity is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddEvent(CalendarEvent),
    /// Full replace of the event with the same id.
    UpdateEvent(CalendarEvent),
    DeleteEvent(EventId),
    /// Shifts start and end by the same offset, preserving duration.
    MoveEvent {
        id: EventId,
        day_delta: i64,
        minute_delta: i64,
    },
    SetSelectedDate(NaiveDate),
    OpenModal(Option<TimeSlot>),
    CloseModal,
    /// Opens the modal on a value copy of the event.
    EditEvent(CalendarEvent),
    SelectGoal(GoalId),
    /// Opens the modal on a one-hour draft built from the task.
    CreateEventFromTask { task_id: TaskId, slot: TimeSlot },
    /// Replaces the goal and task catalog.
    LoadCatalog { goals: Vec<Goal>, tasks: Vec<Task> },
    /// Appends externally sourced events, skipping invalid or known ids.
    ImportEvents(Vec<CalendarEvent>),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddEvent(_) => "AddEvent",
            Command::UpdateEvent(_) => "UpdateEvent",
            Command::DeleteEvent(_) => "DeleteEvent",
            Command::MoveEvent { .. } => "MoveEvent",
            Command::SetSelectedDate(_) => "SetSelectedDate",
            Command::OpenModal(_) => "OpenModal",
            Command::CloseModal => "CloseModal",
            Command::EditEvent(_) => "EditEvent",
            Command::SelectGoal(_) => "SelectGoal",
            Command::CreateEventFromTask { .. } => "CreateEventFromTask",
            Command::LoadCatalog { .. } => "LoadCatalog",
            Command::ImportEvents(_) => "ImportEvents",
        }
    }
}
