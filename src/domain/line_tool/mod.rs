pub mod entities;
pub mod long_short;
pub mod options;
pub mod value_objects;

pub use entities::{LineTool, LineToolExport};
pub use long_short::LongShortState;
pub use options::*;
pub use value_objects::*;
