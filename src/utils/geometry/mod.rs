//! Time geometry: pure mapping between wall-clock time and week-grid pixels.
//!
//! The grid is 24 hour rows of `row_height` pixels per day column, each row
//! split into `60 / slot_minutes` sub-slots. A block's `top` is measured from
//! midnight of its column.

use chrono::{NaiveDate, NaiveTime, Timelike};
use egui::Pos2;

use crate::models::event::CalendarEvent;
use crate::models::settings::Settings;

pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub row_height: f32,
    pub min_event_height: f32,
    pub min_resize_height: f32,
    pub min_event_minutes: i64,
    pub slot_minutes: u32,
}

impl GridMetrics {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            row_height: settings.row_height,
            min_event_height: settings.min_event_height,
            min_resize_height: settings.min_resize_height,
            min_event_minutes: settings.min_event_minutes,
            slot_minutes: settings.slot_minutes.max(1),
        }
    }

    /// Minutes represented by one vertical pixel (1.25 at 48px rows).
    pub fn minutes_per_pixel(&self) -> f32 {
        60.0 / self.row_height
    }

    pub fn slot_height(&self) -> f32 {
        self.row_height * self.slot_minutes as f32 / 60.0
    }

    pub fn slots_per_hour(&self) -> u32 {
        60 / self.slot_minutes
    }

    pub fn grid_height(&self) -> f32 {
        self.row_height * HOURS_PER_DAY as f32
    }

    pub fn offset_for_time(&self, time: NaiveTime) -> f32 {
        let minutes = time.hour() as f32 * 60.0 + time.minute() as f32 + time.second() as f32 / 60.0;
        minutes / 60.0 * self.row_height
    }
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Vertical placement of an event block inside its day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockPosition {
    pub top: f32,
    pub height: f32,
}

impl BlockPosition {
    /// Height to draw with. The floor is presentational; durations are untouched.
    pub fn display_height(&self, metrics: &GridMetrics) -> f32 {
        self.height.max(metrics.min_event_height)
    }
}

pub fn event_position(event: &CalendarEvent, metrics: &GridMetrics) -> BlockPosition {
    let top = metrics.offset_for_time(event.start.time());
    let duration_minutes = event.duration().num_seconds() as f32 / 60.0;
    BlockPosition {
        top,
        height: duration_minutes / 60.0 * metrics.row_height,
    }
}

/// Events attributed to `day`: those whose start falls on it.
///
/// Events running past midnight are not split; they only appear under their
/// start day.
pub fn events_on_day(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| event.start_date() == day)
        .collect()
}

/// Calendar-time offset produced by a move gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveDelta {
    pub day_delta: i64,
    pub minute_delta: i64,
}

impl MoveDelta {
    pub fn is_zero(&self) -> bool {
        self.day_delta == 0 && self.minute_delta == 0
    }
}

/// Converts a pointer displacement into whole days and minutes.
///
/// A non-positive column width yields no day movement.
pub fn drag_deltas(
    start: Pos2,
    end: Pos2,
    day_column_width: f32,
    metrics: &GridMetrics,
) -> MoveDelta {
    let day_delta = if day_column_width > 0.0 {
        ((end.x - start.x) / day_column_width).round() as i64
    } else {
        0
    };
    MoveDelta {
        day_delta,
        minute_delta: resize_minutes(end.y - start.y, metrics),
    }
}

/// Minutes corresponding to a vertical pointer displacement.
pub fn resize_minutes(delta_y: f32, metrics: &GridMetrics) -> i64 {
    (delta_y * metrics.minutes_per_pixel()).round() as i64
}

/// Hour and sub-slot minute under a y offset within a day column.
pub fn slot_at_offset(y: f32, metrics: &GridMetrics) -> (u32, u32) {
    let clamped = y.clamp(0.0, metrics.grid_height() - 0.001);
    let minutes = (clamped * metrics.minutes_per_pixel()).floor() as u32;
    let hour = (minutes / 60).min(HOURS_PER_DAY - 1);
    (hour, quantize_minute(minutes % 60, metrics.slot_minutes))
}

/// Floors a minute-of-hour to the start of its sub-slot.
pub fn quantize_minute(minute: u32, slot_minutes: u32) -> u32 {
    let step = slot_minutes.max(1);
    (minute.min(59) / step) * step
}

/// Index of the day column under an x offset measured from the first column.
pub fn day_index_at(x: f32, day_column_width: f32) -> Option<usize> {
    if x < 0.0 || day_column_width <= 0.0 {
        return None;
    }
    let index = (x / day_column_width).floor() as usize;
    (index < DAYS_PER_WEEK).then_some(index)
}
