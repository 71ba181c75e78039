//! Geometric renderers: one data record in, draw and hit test out.

pub mod anchor;
pub mod arc;
pub mod circle;
pub mod composite;
pub mod polygon;
pub mod rectangle;
pub mod segment;
pub mod spiral;
pub mod text;
pub mod triangle;

use serde::Serialize;
use strum::EnumIter;

use super::surface::Surface;
use crate::domain::geometry::Point;
use crate::domain::line_tool::{BorderOptions, HitTestResult, LineOptions, LineStyle};

pub use anchor::{AnchorData, LineAnchorRenderer};
pub use arc::{ArcData, ArcRenderer};
pub use circle::{CircleData, CircleRenderer};
pub use composite::{CompositeRenderer, RendererArena, RendererRef};
pub use polygon::{PolygonData, PolygonRenderer};
pub use rectangle::{RectangleData, RectangleRenderer};
pub use segment::{SegmentData, SegmentRenderer};
pub use spiral::{SpiralData, SpiralRenderer};
pub use text::{TextData, TextLayout, TextRenderer};
pub use triangle::{TriangleData, TriangleRenderer};

/// Draw and hit test entry points shared by all renderers.
///
/// `draw` receives a surface already scaled to device pixels.
pub trait GeometricRenderer {
    fn draw(&self, surface: &mut dyn Surface, pixel_ratio: f64);
    fn hit_test(&self, point: Point) -> Option<HitTestResult>;
}

/// Stroke style of a line or outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineData {
    pub color: String,
    pub width: f64,
    pub style: LineStyle,
}

impl LineData {
    pub fn new(color: &str, width: f64, style: LineStyle) -> Self {
        Self { color: color.to_string(), width, style }
    }

    pub fn from_line(options: &LineOptions) -> Self {
        Self::new(&options.color, options.width, options.style)
    }

    pub fn from_border(options: &BorderOptions) -> Self {
        Self::new(&options.color, options.width, options.style)
    }

    pub fn with_color(&self, color: &str) -> Self {
        Self { color: color.to_string(), ..self.clone() }
    }

    pub fn apply(&self, surface: &mut dyn Surface) {
        surface.set_stroke_style(&self.color);
        surface.set_line_width(self.width);
        surface.set_line_dash(&self.style.dash_pattern(self.width));
    }
}

/// Renderer data record, one variant per renderer kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data")]
pub enum RendererData {
    Segment(SegmentData),
    Polygon(PolygonData),
    Rectangle(RectangleData),
    Circle(CircleData),
    Arc(ArcData),
    Spiral(SpiralData),
    Triangle(TriangleData),
    Text(TextData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
pub enum RendererKind {
    Segment,
    Polygon,
    Rectangle,
    Circle,
    Arc,
    Spiral,
    Triangle,
    Text,
}

impl RendererData {
    pub fn kind(&self) -> RendererKind {
        match self {
            RendererData::Segment(_) => RendererKind::Segment,
            RendererData::Polygon(_) => RendererKind::Polygon,
            RendererData::Rectangle(_) => RendererKind::Rectangle,
            RendererData::Circle(_) => RendererKind::Circle,
            RendererData::Arc(_) => RendererKind::Arc,
            RendererData::Spiral(_) => RendererKind::Spiral,
            RendererData::Triangle(_) => RendererKind::Triangle,
            RendererData::Text(_) => RendererKind::Text,
        }
    }
}

/// Strokes the polyline through `points`
pub(crate) fn stroke_path(surface: &mut dyn Surface, points: &[Point], closed: bool) {
    let Some(first) = points.first() else {
        return;
    };
    surface.begin_path();
    surface.move_to(first.x, first.y);
    for p in &points[1..] {
        surface.line_to(p.x, p.y);
    }
    if closed {
        surface.close_path();
    }
}
