use serde::Serialize;

use super::{GeometricRenderer, LineData, stroke_path};
use crate::domain::geometry::{Point, distance_to_segment, point_in_polygon};
use crate::domain::line_tool::{HitTestResult, HitTestType};
use crate::infrastructure::rendering::surface::Surface;

/// Two points while the third is still being placed, three afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriangleData {
    pub points: Vec<Point>,
    pub border: Option<LineData>,
    pub fill: Option<String>,
    pub hit_background: bool,
    pub tolerance: f64,
}

#[derive(Debug, Default)]
pub struct TriangleRenderer {
    data: Option<TriangleData>,
}

impl TriangleRenderer {
    pub fn set_data(&mut self, data: TriangleData) {
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&TriangleData> {
        self.data.as_ref()
    }
}

impl GeometricRenderer for TriangleRenderer {
    fn draw(&self, surface: &mut dyn Surface, _pixel_ratio: f64) {
        let Some(data) = &self.data else {
            return;
        };
        let closed = data.points.len() >= 3;
        if data.points.len() < 2 {
            return;
        }
        if let Some(fill) = data.fill.as_ref().filter(|_| closed) {
            stroke_path(surface, &data.points, true);
            surface.set_fill_style(fill);
            surface.fill();
        }
        if let Some(border) = &data.border {
            border.apply(surface);
            stroke_path(surface, &data.points, closed);
            surface.stroke();
        }
    }

    fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        let n = data.points.len();
        if n < 2 {
            return None;
        }
        let width = data.border.as_ref().map_or(0.0, |b| b.width);
        let edges = if n >= 3 { n } else { 1 };
        let on_edge = (0..edges)
            .any(|i| distance_to_segment(point, data.points[i], data.points[(i + 1) % n]) <= data.tolerance + width / 2.0);
        if on_edge {
            return Some(HitTestResult::new(HitTestType::MovePoint));
        }
        (data.hit_background && point_in_polygon(point, &data.points))
            .then(|| HitTestResult::new(HitTestType::MovePointBackground))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_tool::LineStyle;

    #[test]
    fn interior_hits_as_background() {
        let mut renderer = TriangleRenderer::default();
        renderer.set_data(TriangleData {
            points: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(50.0, 100.0)],
            border: Some(LineData::new("#000", 1.0, LineStyle::Solid)),
            fill: Some("red".into()),
            hit_background: true,
            tolerance: 3.0,
        });
        assert_eq!(renderer.hit_test(Point::new(50.0, 1.0)).map(|h| h.hit_type), Some(HitTestType::MovePoint));
        assert_eq!(
            renderer.hit_test(Point::new(50.0, 40.0)).map(|h| h.hit_type),
            Some(HitTestType::MovePointBackground)
        );
        assert!(renderer.hit_test(Point::new(0.0, 100.0)).is_none());
    }
}
