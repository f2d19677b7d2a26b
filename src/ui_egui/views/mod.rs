pub mod header;
pub(crate) mod palette;
pub mod task_sidebar;
pub mod week_view;

use chrono::{NaiveDate, NaiveTime, Timelike};
use egui::{pos2, vec2, Pos2, Rect};

use crate::models::goal::TaskId;
use crate::models::ui::TimeSlot;
use crate::utils::geometry::{slot_at_offset, GridMetrics, DAYS_PER_WEEK};

pub const TIME_LABEL_WIDTH: f32 = 56.0;
pub const COLUMN_SPACING: f32 = 2.0;
const MIN_COLUMN_WIDTH: f32 = 40.0;
/// Space kept above the current hour when the grid first opens
const SCROLL_HEADROOM: f32 = 100.0;

/// Drag-and-drop payload carried from the task sidebar to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPayload {
    pub task_id: TaskId,
}

/// Horizontal placement of the hour labels and seven day columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin: Pos2,
    pub col_width: f32,
    pub height: f32,
}

impl GridLayout {
    pub fn new(rect: Rect) -> Self {
        Self {
            origin: rect.min,
            col_width: column_width(rect.width()),
            height: rect.height(),
        }
    }

    /// Distance between the left edges of neighbouring columns.
    pub fn column_pitch(&self) -> f32 {
        self.col_width + COLUMN_SPACING
    }

    pub fn column_left(&self, index: usize) -> f32 {
        self.origin.x + TIME_LABEL_WIDTH + COLUMN_SPACING + index as f32 * self.column_pitch()
    }

    pub fn column_rect(&self, index: usize) -> Rect {
        Rect::from_min_size(
            pos2(self.column_left(index), self.origin.y),
            vec2(self.col_width, self.height),
        )
    }

    pub fn label_rect(&self) -> Rect {
        Rect::from_min_size(self.origin, vec2(TIME_LABEL_WIDTH, self.height))
    }

    /// Block rect inside column `index`, inset from the column edges.
    pub fn block_rect(&self, index: usize, top: f32, height: f32) -> Rect {
        let column = self.column_rect(index);
        Rect::from_min_size(
            pos2(column.left() + 2.0, column.top() + top),
            vec2((self.col_width - 4.0).max(1.0), height),
        )
    }

    /// The sub-slot of `day` under `pointer`.
    pub fn slot_at(&self, pointer: Pos2, day: NaiveDate, metrics: &GridMetrics) -> TimeSlot {
        let (hour, minute) = slot_at_offset(pointer.y - self.origin.y, metrics);
        TimeSlot::new(day, hour, minute)
    }

    pub fn slot_rect(&self, index: usize, slot: &TimeSlot, metrics: &GridMetrics) -> Rect {
        let top = slot.hour as f32 * metrics.row_height
            + slot.minute as f32 / 60.0 * metrics.row_height;
        self.block_rect(index, top, metrics.slot_height())
    }
}

/// Width of one day column when the grid is `available` pixels wide.
pub fn column_width(available: f32) -> f32 {
    let spacing = COLUMN_SPACING * DAYS_PER_WEEK as f32;
    ((available - TIME_LABEL_WIDTH - spacing) / DAYS_PER_WEEK as f32).max(MIN_COLUMN_WIDTH)
}

/// Scroll offset that puts the current hour near the top of the grid.
pub fn initial_scroll_offset(now: NaiveTime, metrics: &GridMetrics) -> f32 {
    (now.hour() as f32 * metrics.row_height - SCROLL_HEADROOM).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        // 7 columns of 100px after the label and spacing
        let width = TIME_LABEL_WIDTH + 7.0 * (100.0 + COLUMN_SPACING);
        GridLayout::new(Rect::from_min_size(pos2(10.0, 20.0), vec2(width, 1152.0)))
    }

    #[test]
    fn test_columns_are_evenly_spaced() {
        let layout = layout();
        assert_eq!(layout.col_width, 100.0);
        assert_eq!(layout.column_left(0), 10.0 + TIME_LABEL_WIDTH + COLUMN_SPACING);
        assert_eq!(layout.column_left(3) - layout.column_left(2), layout.column_pitch());
    }

    #[test]
    fn test_slot_at_pointer() {
        let metrics = GridMetrics::default();
        let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        // 10 rows plus 40px (50 minutes) below the grid origin
        let slot = layout().slot_at(pos2(200.0, 20.0 + 480.0 + 40.0), day, &metrics);
        assert_eq!(slot, TimeSlot::new(day, 10, 45));
    }

    #[test]
    fn test_narrow_grid_keeps_minimum_width() {
        assert_eq!(column_width(100.0), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_initial_scroll_offset() {
        let metrics = GridMetrics::default();
        let morning = NaiveTime::from_hms_opt(1, 30, 0).unwrap();
        let afternoon = NaiveTime::from_hms_opt(14, 5, 0).unwrap();
        assert_eq!(initial_scroll_offset(morning, &metrics), 0.0);
        assert_eq!(initial_scroll_offset(afternoon, &metrics), 14.0 * 48.0 - 100.0);
    }
}
