pub mod date;
pub mod geometry;
pub mod id;
