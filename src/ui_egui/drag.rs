use egui::{Pos2, Vec2};

use crate::models::event::{CalendarEvent, EventId};
use crate::services::store::Command;
use crate::utils::geometry::{drag_deltas, GridMetrics, MoveDelta};

/// State of an in-flight move gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub event_id: EventId,
    /// Pointer position when the gesture started
    pub anchor: Pos2,
    pub pointer_pos: Option<Pos2>,
    pub day_column_width: f32,
}

impl DragContext {
    pub fn from_event(event: &CalendarEvent, anchor: Pos2, day_column_width: f32) -> Self {
        Self {
            event_id: event.id.clone(),
            anchor,
            pointer_pos: None,
            day_column_width,
        }
    }

    pub fn update_pointer(&mut self, pointer: Pos2) {
        self.pointer_pos = Some(pointer);
    }

    /// How far the detached block should be drawn from its resting place.
    pub fn visual_offset(&self) -> Vec2 {
        self.pointer_pos
            .map(|pos| pos - self.anchor)
            .unwrap_or(Vec2::ZERO)
    }

    pub fn delta_to(&self, pointer: Pos2, metrics: &GridMetrics) -> MoveDelta {
        drag_deltas(self.anchor, pointer, self.day_column_width, metrics)
    }

    /// Command committing a release at `pointer`; `None` when nothing moved.
    pub fn finish(&self, pointer: Pos2, metrics: &GridMetrics) -> Option<Command> {
        let delta = self.delta_to(pointer, metrics);
        if delta.is_zero() {
            return None;
        }
        Some(Command::MoveEvent {
            id: self.event_id.clone(),
            day_delta: delta.day_delta,
            minute_delta: delta.minute_delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventCategory;
    use chrono::NaiveDate;
    use egui::pos2;

    fn sample() -> CalendarEvent {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(10, 0, 0).unwrap();
        CalendarEvent::builder()
            .id("e1")
            .title("Focus")
            .category(EventCategory::Work)
            .start(start)
            .end(start + chrono::Duration::minutes(30))
            .build()
            .unwrap()
    }

    #[test]
    fn test_finish_without_movement_is_none() {
        let ctx = DragContext::from_event(&sample(), pos2(50.0, 50.0), 100.0);
        assert_eq!(ctx.finish(pos2(50.0, 50.0), &GridMetrics::default()), None);
    }

    #[test]
    fn test_finish_emits_move() {
        let ctx = DragContext::from_event(&sample(), pos2(50.0, 50.0), 100.0);
        let command = ctx.finish(pos2(160.0, 86.0), &GridMetrics::default());
        assert_eq!(
            command,
            Some(Command::MoveEvent {
                id: "e1".to_string(),
                day_delta: 1,
                minute_delta: 45,
            })
        );
    }

    #[test]
    fn test_visual_offset_follows_pointer() {
        let mut ctx = DragContext::from_event(&sample(), pos2(0.0, 0.0), 100.0);
        assert_eq!(ctx.visual_offset(), egui::Vec2::ZERO);

        ctx.update_pointer(pos2(-100.0, 24.0));
        assert_eq!(ctx.visual_offset(), egui::vec2(-100.0, 24.0));
        assert_eq!(
            ctx.delta_to(pos2(-100.0, 24.0), &GridMetrics::default()),
            MoveDelta {
                day_delta: -1,
                minute_delta: 30,
            }
        );
    }
}
