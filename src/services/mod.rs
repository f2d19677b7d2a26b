// Service layer: event store, REST data access, import and settings

pub mod api;
pub mod import;
pub mod settings;
pub mod store;
