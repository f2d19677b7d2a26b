//! Gesture engine for event blocks.
//!
//! One gesture at a time: `Idle -> Dragging -> Idle` or `Idle -> Resizing -> Idle`.
//! While a gesture runs the engine only produces [`Preview`] values for the
//! renderer; the store is touched exclusively through the [`GestureOutcome`]
//! returned on release.
//!
//! Each gesture holds a [`ListenerGuard`] for its pointer subscription. The
//! guard is released when the gesture ends on any path, and its `Drop` impl
//! covers gestures that are replaced or abandoned.

use egui::{Context, Id, Pos2, Vec2};
use std::cell::Cell;
use std::rc::Rc;

use super::drag::DragContext;
use super::resize::{ResizeContext, ResizeDecision};
use crate::models::event::{CalendarEvent, EventId};
use crate::services::store::Command;
use crate::utils::geometry::GridMetrics;

pub type ListenerId = u64;

/// Source of ambient pointer events that a gesture subscribes to.
pub trait PointerListeners {
    fn attach(&self) -> ListenerId;
    fn detach(&self, id: ListenerId);
}

/// Scoped pointer subscription; detaches exactly once.
pub struct ListenerGuard {
    listeners: Rc<dyn PointerListeners>,
    id: Option<ListenerId>,
}

impl ListenerGuard {
    pub fn acquire(listeners: &Rc<dyn PointerListeners>) -> Self {
        let id = listeners.attach();
        Self {
            listeners: Rc::clone(listeners),
            id: Some(id),
        }
    }

    pub fn release(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(id) = self.id.take() {
            self.listeners.detach(id);
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.detach();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging(DragContext),
    Resizing(ResizeContext),
}

/// Presentation-only feedback for the block under an active gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum Preview {
    /// Block drawn translucent and offset, ignoring pointer targeting
    Detached { event_id: EventId, offset: Vec2 },
    /// Block drawn with a live height
    Height { event_id: EventId, height: f32 },
}

impl Preview {
    pub fn event_id(&self) -> &str {
        match self {
            Preview::Detached { event_id, .. } | Preview::Height { event_id, .. } => event_id,
        }
    }
}

/// Result of releasing the pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    /// No gesture was active
    Idle,
    /// Gesture ended without a change worth committing
    Unchanged { event_id: EventId },
    /// Command to hand to the store
    Committed(Command),
    /// Resize refused; the block goes back to `revert_height`
    Rejected { event_id: EventId, revert_height: f32 },
}

pub struct InteractionEngine {
    state: GestureState,
    session: Option<ListenerGuard>,
    listeners: Rc<dyn PointerListeners>,
    metrics: GridMetrics,
}

impl InteractionEngine {
    pub fn new(listeners: Rc<dyn PointerListeners>, metrics: GridMetrics) -> Self {
        Self {
            state: GestureState::Idle,
            session: None,
            listeners,
            metrics,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    pub fn active_event_id(&self) -> Option<&str> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::Dragging(ctx) => Some(&ctx.event_id),
            GestureState::Resizing(ctx) => Some(ctx.event_id()),
        }
    }

    /// Starts a move gesture, cancelling whatever gesture was running.
    pub fn begin_move(&mut self, event: &CalendarEvent, pointer: Pos2, day_column_width: f32) {
        self.cancel_active();
        log::debug!("Move gesture started for {}", event.id);
        self.session = Some(ListenerGuard::acquire(&self.listeners));
        self.state = GestureState::Dragging(DragContext::from_event(event, pointer, day_column_width));
    }

    /// Starts a bottom-edge resize, cancelling whatever gesture was running.
    pub fn begin_resize(&mut self, event: &CalendarEvent, pointer: Pos2, rendered_height: f32) {
        self.cancel_active();
        log::debug!("Resize gesture started for {}", event.id);
        self.session = Some(ListenerGuard::acquire(&self.listeners));
        self.state = GestureState::Resizing(ResizeContext::new(event, pointer.y, rendered_height));
    }

    /// Feeds pointer motion. Never produces a command.
    pub fn pointer_moved(&mut self, pointer: Pos2) -> Option<Preview> {
        match &mut self.state {
            GestureState::Idle => None,
            GestureState::Dragging(ctx) => {
                ctx.update_pointer(pointer);
                Some(Preview::Detached {
                    event_id: ctx.event_id.clone(),
                    offset: ctx.visual_offset(),
                })
            }
            GestureState::Resizing(ctx) => {
                let height = ctx.update_pointer(pointer.y, &self.metrics);
                Some(Preview::Height {
                    event_id: ctx.event_id().clone(),
                    height,
                })
            }
        }
    }

    /// Current preview, for renderers that redraw every frame.
    pub fn preview(&self) -> Option<Preview> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::Dragging(ctx) => Some(Preview::Detached {
                event_id: ctx.event_id.clone(),
                offset: ctx.visual_offset(),
            }),
            GestureState::Resizing(ctx) => Some(Preview::Height {
                event_id: ctx.event_id().clone(),
                height: ctx.live_height,
            }),
        }
    }

    /// Ends the active gesture at `pointer`.
    pub fn pointer_released(&mut self, pointer: Pos2) -> GestureOutcome {
        match self.end_session() {
            GestureState::Idle => GestureOutcome::Idle,
            GestureState::Dragging(ctx) => match ctx.finish(pointer, &self.metrics) {
                Some(command) => {
                    log::debug!("Move gesture for {} committed", ctx.event_id);
                    GestureOutcome::Committed(command)
                }
                None => GestureOutcome::Unchanged {
                    event_id: ctx.event_id,
                },
            },
            GestureState::Resizing(ctx) => match ctx.decide(pointer.y, &self.metrics) {
                ResizeDecision::Commit(event) => {
                    log::debug!("Resize for {} committed, new end {}", event.id, event.end);
                    GestureOutcome::Committed(Command::UpdateEvent(event))
                }
                ResizeDecision::Unchanged => GestureOutcome::Unchanged {
                    event_id: ctx.event.id,
                },
                ResizeDecision::Reject => {
                    log::debug!(
                        "Resize for {} rejected: below {} minute minimum",
                        ctx.event.id,
                        self.metrics.min_event_minutes
                    );
                    GestureOutcome::Rejected {
                        revert_height: ctx.revert_height(&self.metrics),
                        event_id: ctx.event.id,
                    }
                }
            },
        }
    }

    /// Ends the active gesture when the release carried no pointer position,
    /// e.g. the button came up outside the window. Nothing is committed.
    pub fn pointer_lost(&mut self) -> GestureOutcome {
        match self.end_session() {
            GestureState::Idle => GestureOutcome::Idle,
            GestureState::Dragging(ctx) => {
                log::debug!("Move gesture for {} lost its pointer", ctx.event_id);
                GestureOutcome::Unchanged {
                    event_id: ctx.event_id,
                }
            }
            GestureState::Resizing(ctx) => {
                log::debug!("Resize for {} lost its pointer", ctx.event.id);
                GestureOutcome::Unchanged {
                    event_id: ctx.event.id,
                }
            }
        }
    }

    /// A click that did not start a gesture opens the event for editing.
    pub fn click(&self, event: &CalendarEvent) -> Option<Command> {
        if self.is_active() {
            return None;
        }
        Some(Command::EditEvent(event.clone()))
    }

    fn end_session(&mut self) -> GestureState {
        if let Some(session) = self.session.take() {
            session.release();
        }
        std::mem::replace(&mut self.state, GestureState::Idle)
    }

    fn cancel_active(&mut self) {
        if self.is_active() {
            log::debug!("Cancelling gesture for {:?}", self.active_event_id());
        }
        self.state = GestureState::Idle;
        if let Some(session) = self.session.take() {
            session.release();
        }
    }
}

/// Pointer subscription backed by egui memory.
///
/// egui already delivers global pointer state every frame; attaching marks
/// the context as captured so views route that state into the engine.
pub struct EguiPointerCapture {
    ctx: Context,
    next_id: Cell<ListenerId>,
}

impl EguiPointerCapture {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            next_id: Cell::new(1),
        }
    }

    fn storage_id() -> Id {
        Id::new("week_planner_pointer_capture")
    }

    pub fn is_capturing(ctx: &Context) -> bool {
        ctx.memory(|mem| mem.data.get_temp::<ListenerId>(Self::storage_id()).is_some())
    }
}

impl PointerListeners for EguiPointerCapture {
    fn attach(&self) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.ctx.memory_mut(|mem| {
            mem.data.insert_temp(Self::storage_id(), id);
        });
        id
    }

    fn detach(&self, id: ListenerId) {
        self.ctx.memory_mut(|mem| {
            if mem.data.get_temp::<ListenerId>(Self::storage_id()) == Some(id) {
                mem.data.remove::<ListenerId>(Self::storage_id());
            }
        });
    }
}
