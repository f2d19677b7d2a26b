// UI selection models
// Owned exclusively by the event store; views only read them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::event::CalendarEvent;
use crate::models::goal::GoalId;

/// A quarter-hour cell on the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    pub day: NaiveDate,
    pub hour: u32,
    pub minute: u32,
}

impl TimeSlot {
    pub fn new(day: NaiveDate, hour: u32, minute: u32) -> Self {
        Self { day, hour, minute }
    }

    /// Wall-clock start of the slot; out-of-range components clamp to the day's last minute.
    pub fn start(&self) -> NaiveDateTime {
        let time = NaiveTime::from_hms_opt(self.hour.min(23), self.minute.min(59), 0)
            .unwrap_or(NaiveTime::MIN);
        self.day.and_time(time)
    }
}

/// Current selection and modal context of the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiSelection {
    pub selected_date: NaiveDate,
    pub selected_goal: Option<GoalId>,
    pub modal_open: bool,
    /// Value copy of the event being edited (or a draft from a task drop).
    pub editing_event: Option<CalendarEvent>,
    pub clicked_time_slot: Option<TimeSlot>,
}

impl UiSelection {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            selected_date,
            selected_goal: None,
            modal_open: false,
            editing_event: None,
            clicked_time_slot: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_start() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let slot = TimeSlot::new(day, 14, 45);
        assert_eq!(slot.start(), day.and_hms_opt(14, 45, 0).unwrap());
    }

    #[test]
    fn test_new_selection_is_closed() {
        let selection = UiSelection::new(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert!(!selection.modal_open);
        assert!(selection.editing_event.is_none());
        assert!(selection.selected_goal.is_none());
    }
}
