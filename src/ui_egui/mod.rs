mod app;
pub mod drag;
pub mod event_dialog;
pub mod gesture;
pub mod resize;
pub mod views;

pub use app::CalendarApp;
