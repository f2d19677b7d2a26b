// Event module
// Time-blocked calendar event model

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::color::Rgb;
use crate::utils::id::generate_unique_id;

pub mod timestamp;

pub type EventId = String;

/// What kind of activity an event blocks out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Exercise,
    Eating,
    #[default]
    Work,
    Relax,
    Family,
    Social,
}

impl EventCategory {
    pub const ALL: [EventCategory; 6] = [
        EventCategory::Exercise,
        EventCategory::Eating,
        EventCategory::Work,
        EventCategory::Relax,
        EventCategory::Family,
        EventCategory::Social,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Exercise => "Exercise",
            EventCategory::Eating => "Eating",
            EventCategory::Work => "Work",
            EventCategory::Relax => "Relax",
            EventCategory::Family => "Family",
            EventCategory::Social => "Social",
        }
    }

    /// Color used for events of this category that carry no color of their own.
    pub fn default_color(&self) -> Rgb {
        match self {
            EventCategory::Exercise => Rgb::new(0x65, 0xc4, 0x66),
            EventCategory::Eating => Rgb::new(0xf9, 0x73, 0x16),
            EventCategory::Work => Rgb::new(0x9b, 0x87, 0xf5),
            EventCategory::Relax => Rgb::new(0x38, 0xbd, 0xf8),
            EventCategory::Family => Rgb::new(0xec, 0x48, 0x99),
            EventCategory::Social => Rgb::new(0x8b, 0x5c, 0xf6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event end time must be after start time")]
    EndNotAfterStart,
    #[error("Event id has not been assigned")]
    MissingId,
}

/// A time-blocked event on the week grid.
///
/// `id` is assigned once at creation; an empty id marks a draft that has not
/// been committed to the store yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub category: EventCategory,
    #[serde(with = "timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

impl CalendarEvent {
    /// Create a new event with a freshly generated id.
    ///
    /// # Examples
    /// ```
    /// use week_planner::models::event::{CalendarEvent, EventCategory};
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = CalendarEvent::new("Standup", EventCategory::Work, start, end).unwrap();
    /// assert!(!event.id.is_empty());
    /// ```
    pub fn new(
        title: impl Into<String>,
        category: EventCategory,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventValidationError> {
        let event = Self {
            id: generate_unique_id(),
            title: title.into(),
            category,
            start,
            end,
            color: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// An uncommitted event used to pre-fill the creation form.
    pub fn draft(
        title: impl Into<String>,
        category: EventCategory,
        start: NaiveDateTime,
        end: NaiveDateTime,
        color: Option<Rgb>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            category,
            start,
            end,
            color,
        }
    }

    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_empty()
    }

    /// Checks that the event can live in the store.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.is_empty() {
            return Err(EventValidationError::MissingId);
        }
        self.validate_times()
    }

    /// Checks only the time range, which drafts must also satisfy.
    pub fn validate_times(&self) -> Result<(), EventValidationError> {
        if self.end <= self.start {
            return Err(EventValidationError::EndNotAfterStart);
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Calendar date the event is attributed to on the grid.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Color to render with: the event's own, else its category default.
    pub fn display_color(&self) -> Rgb {
        self.color.unwrap_or_else(|| self.category.default_color())
    }

    /// Copy of this event with start and end shifted by the same offset.
    ///
    /// `None` when the offset or either shifted timestamp falls outside
    /// chrono's representable range.
    pub fn shifted(&self, day_delta: i64, minute_delta: i64) -> Option<Self> {
        let offset = Duration::try_days(day_delta)?.checked_add(&Duration::try_minutes(minute_delta)?)?;
        Some(Self {
            start: self.start.checked_add_signed(offset)?,
            end: self.end.checked_add_signed(offset)?,
            ..self.clone()
        })
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    id: Option<EventId>,
    title: Option<String>,
    category: EventCategory,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    color: Option<Rgb>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            category: EventCategory::default(),
            start: None,
            end: None,
            color: None,
        }
    }

    /// Use a known id instead of generating one (imports, tests).
    pub fn id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn build(self) -> Result<CalendarEvent, EventValidationError> {
        let title = self.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(EventValidationError::EndNotAfterStart);
        };

        let event = CalendarEvent {
            id: self.id.unwrap_or_else(generate_unique_id),
            title,
            category: self.category,
            start,
            end,
            color: self.color,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_new_event_assigns_id() {
        let event = CalendarEvent::new("Gym", EventCategory::Exercise, at(6, 7, 0), at(6, 8, 0)).unwrap();
        assert!(!event.id.is_empty());
        assert!(!event.is_draft());
        assert_eq!(event.duration(), Duration::hours(1));
    }

    #[test]
    fn test_new_event_rejects_inverted_times() {
        let result = CalendarEvent::new("Gym", EventCategory::Exercise, at(6, 8, 0), at(6, 7, 0));
        assert_eq!(result, Err(EventValidationError::EndNotAfterStart));
    }

    #[test]
    fn test_new_event_rejects_zero_duration() {
        let result = CalendarEvent::new("Gym", EventCategory::Exercise, at(6, 8, 0), at(6, 8, 0));
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_has_no_id() {
        let draft = CalendarEvent::draft("Reading", EventCategory::Work, at(6, 9, 0), at(6, 10, 0), None);
        assert!(draft.is_draft());
        assert_eq!(draft.validate(), Err(EventValidationError::MissingId));
        assert!(draft.validate_times().is_ok());
    }

    #[test]
    fn test_builder_with_fixed_id() {
        let event = CalendarEvent::builder()
            .id("e1")
            .title("Lunch")
            .category(EventCategory::Eating)
            .start(at(7, 12, 0))
            .end(at(7, 13, 0))
            .color(Rgb::new(1, 2, 3))
            .build()
            .unwrap();

        assert_eq!(event.id, "e1");
        assert_eq!(event.category, EventCategory::Eating);
        assert_eq!(event.color, Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_builder_missing_title() {
        let result = CalendarEvent::builder().start(at(7, 12, 0)).end(at(7, 13, 0)).build();
        assert_eq!(result.unwrap_err(), EventValidationError::EmptyTitle);
    }

    #[test]
    fn test_shifted_preserves_duration() {
        let event = CalendarEvent::builder()
            .id("e1")
            .title("Call")
            .start(at(6, 23, 30))
            .end(at(7, 0, 45))
            .build()
            .unwrap();

        let moved = event.shifted(2, -45).unwrap();
        assert_eq!(moved.start, at(8, 22, 45));
        assert_eq!(moved.end, at(9, 0, 0));
        assert_eq!(moved.duration(), event.duration());
        assert_eq!(moved.id, event.id);
    }

    #[test]
    fn test_shifted_out_of_range_is_none() {
        let event = CalendarEvent::draft("Call", EventCategory::Work, at(6, 9, 0), at(6, 10, 0), None);

        assert_eq!(event.shifted(200_000_000, 0), None);
        assert_eq!(event.shifted(0, i64::MAX), None);
        assert_eq!(event.shifted(i64::MIN, 0), None);
        assert!(event.shifted(36_500, 0).is_some());
    }

    #[test]
    fn test_display_color_falls_back_to_category() {
        let mut event = CalendarEvent::draft("x", EventCategory::Family, at(6, 9, 0), at(6, 10, 0), None);
        assert_eq!(event.display_color(), Rgb::new(0xec, 0x48, 0x99));

        event.color = Some(Rgb::new(0, 0, 0));
        assert_eq!(event.display_color(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_json_shape() {
        let event = CalendarEvent::builder()
            .id("abc")
            .title("Team Meeting")
            .category(EventCategory::Work)
            .start(at(6, 10, 0))
            .end(at(6, 11, 30))
            .build()
            .unwrap();

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "abc",
                "title": "Team Meeting",
                "category": "work",
                "start": "2025-01-06T10:00:00",
                "end": "2025-01-06T11:30:00",
            })
        );
    }
}
