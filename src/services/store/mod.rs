//! Event store: single source of truth for events, goals, tasks and the UI
//! selection.
//!
//! Commands are applied synchronously through `&mut self`, so one command
//! always completes before the next is issued. Each application swaps in a
//! new immutable snapshot; a no-op keeps the current one.

mod command;
mod seed;
mod state;

pub use command::Command;
pub use seed::{sample_events, seeded_state};
pub use state::{reduce, CalendarState};

use std::sync::Arc;

pub struct EventStore {
    state: Arc<CalendarState>,
    revision: u64,
}

impl EventStore {
    pub fn new(state: CalendarState) -> Self {
        Self {
            state: Arc::new(state),
            revision: 0,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<CalendarState> {
        Arc::clone(&self.state)
    }

    /// Number of commands that changed the state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies a command. Returns whether the state changed.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let name = command.name();
        let next = reduce(&self.state, command);
        if Arc::ptr_eq(&next, &self.state) {
            log::debug!("{} left the calendar unchanged", name);
            return false;
        }
        self.state = next;
        self.revision += 1;
        log::debug!("{} applied (revision {})", name, self.revision);
        true
    }

    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) -> usize {
        commands
            .into_iter()
            .map(|command| self.dispatch(command))
            .filter(|changed| *changed)
            .count()
    }
}
