pub mod grid_handler;
pub mod segment_handler;
