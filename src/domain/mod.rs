pub mod chart;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod line_tool;
pub mod logging;
