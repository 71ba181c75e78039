pub mod canvas_surface;
pub mod renderers;
pub mod surface;

pub use canvas_surface::CanvasSurface;
pub use renderers::{CompositeRenderer, GeometricRenderer, RendererArena, RendererData};
pub use surface::{DrawCommand, RecordingSurface, Surface};
