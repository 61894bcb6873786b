pub mod error;
pub mod grid;
pub mod mosaic;
pub mod pattern;
pub mod planner;
pub mod render;
pub mod types;
