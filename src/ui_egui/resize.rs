// Event Resize
//
// Bottom-edge resizing of event blocks. The block height follows the pointer
// while dragging; only the release commits a new end time.

use chrono::Duration;

use crate::models::event::{CalendarEvent, EventId};
use crate::utils::geometry::{event_position, resize_minutes, GridMetrics};

/// Size of the resize handle hit area
pub const HANDLE_SIZE: f32 = 8.0;

/// Context for an active resize operation
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeContext {
    /// Copy of the event as it was when the gesture started
    pub event: CalendarEvent,
    /// Pointer Y at gesture start
    pub anchor_y: f32,
    /// Rendered block height at gesture start
    pub initial_height: f32,
    /// Height currently drawn
    pub live_height: f32,
}

/// What releasing the resize handle amounts to.
#[derive(Clone, Debug, PartialEq)]
pub enum ResizeDecision {
    /// Pointer ended where it started (to the minute)
    Unchanged,
    /// New end accepted; carries the full replacement event
    Commit(CalendarEvent),
    /// New end would violate the minimum duration
    Reject,
}

impl ResizeContext {
    pub fn new(event: &CalendarEvent, anchor_y: f32, initial_height: f32) -> Self {
        Self {
            event: event.clone(),
            anchor_y,
            initial_height,
            live_height: initial_height,
        }
    }

    pub fn event_id(&self) -> &EventId {
        &self.event.id
    }

    /// Updates and returns the live preview height for a pointer at `pointer_y`.
    pub fn update_pointer(&mut self, pointer_y: f32, metrics: &GridMetrics) -> f32 {
        let delta_y = pointer_y - self.anchor_y;
        self.live_height = (self.initial_height + delta_y).max(metrics.min_resize_height);
        self.live_height
    }

    pub fn decide(&self, pointer_y: f32, metrics: &GridMetrics) -> ResizeDecision {
        let minutes = resize_minutes(pointer_y - self.anchor_y, metrics);
        if minutes == 0 {
            return ResizeDecision::Unchanged;
        }

        let new_end = self.event.end + Duration::minutes(minutes);
        let earliest_end = self.event.start + Duration::minutes(metrics.min_event_minutes);
        if new_end <= earliest_end {
            return ResizeDecision::Reject;
        }

        ResizeDecision::Commit(CalendarEvent {
            end: new_end,
            ..self.event.clone()
        })
    }

    /// Height the block returns to when the resize is rejected.
    pub fn revert_height(&self, metrics: &GridMetrics) -> f32 {
        event_position(&self.event, metrics).display_height(metrics)
    }
}
