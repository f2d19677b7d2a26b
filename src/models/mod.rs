// Module exports for models

pub mod color;
pub mod event;
pub mod goal;
pub mod settings;
pub mod ui;
