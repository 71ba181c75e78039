pub mod services;
pub mod value_objects;

pub use services::CoordinateMapper;
pub use value_objects::{Color, TimeRange, Viewport, apply_alpha};
