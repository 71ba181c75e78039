use serde::Serialize;

use super::{GeometricRenderer, LineData, stroke_path};
use crate::domain::geometry::{Point, distance_to_segment, point_in_polygon};
use crate::domain::line_tool::{HitTestResult, HitTestType};
use crate::infrastructure::rendering::surface::Surface;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonData {
    pub points: Vec<Point>,
    pub line: Option<LineData>,
    pub fill: Option<String>,
    pub hit_background: bool,
    pub tolerance: f64,
}

impl PolygonData {
    /// Borderless fill, used for level bands
    pub fn band(points: Vec<Point>, fill: String, tolerance: f64) -> Self {
        Self { points, line: None, fill: Some(fill), hit_background: false, tolerance }
    }
}

/// Closed polygon with optional outline and fill
#[derive(Debug, Default)]
pub struct PolygonRenderer {
    data: Option<PolygonData>,
}

impl PolygonRenderer {
    pub fn set_data(&mut self, data: PolygonData) {
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&PolygonData> {
        self.data.as_ref()
    }
}

impl GeometricRenderer for PolygonRenderer {
    fn draw(&self, surface: &mut dyn Surface, _pixel_ratio: f64) {
        let Some(data) = &self.data else {
            return;
        };
        if data.points.len() < 2 {
            return;
        }
        if let Some(fill) = &data.fill {
            if data.points.len() > 2 {
                stroke_path(surface, &data.points, true);
                surface.set_fill_style(fill);
                surface.fill();
            }
        }
        if let Some(line) = &data.line {
            line.apply(surface);
            stroke_path(surface, &data.points, true);
            surface.stroke();
        }
    }

    fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        if let Some(line) = &data.line {
            let n = data.points.len();
            let on_edge = (0..n).any(|i| {
                let (a, b) = (data.points[i], data.points[(i + 1) % n]);
                distance_to_segment(point, a, b) <= data.tolerance + line.width / 2.0
            });
            if on_edge {
                return Some(HitTestResult::new(HitTestType::MovePoint));
            }
        }
        (data.hit_background && point_in_polygon(point, &data.points))
            .then(|| HitTestResult::new(HitTestType::MovePointBackground))
    }
}
