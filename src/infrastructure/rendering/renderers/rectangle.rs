use serde::Serialize;

use super::{GeometricRenderer, LineData};
use crate::domain::geometry::{Point, Rect, distance_to_segment};
use crate::domain::line_tool::{Extend, HitTestResult, HitTestType};
use crate::infrastructure::rendering::surface::Surface;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectangleData {
    pub points: [Point; 2],
    pub border: Option<LineData>,
    pub fill: Option<String>,
    pub extend: Extend,
    pub hit_background: bool,
    pub pane_width: f64,
    pub tolerance: f64,
}

impl RectangleData {
    /// Horizontal band between two corners, no outline
    pub fn band(a: Point, b: Point, fill: String, extend: Extend, pane_width: f64, tolerance: f64) -> Self {
        Self {
            points: [a, b],
            border: None,
            fill: Some(fill),
            extend,
            hit_background: false,
            pane_width,
            tolerance,
        }
    }

    /// Corner-normalised box after horizontal extension
    pub fn rect(&self) -> Rect {
        let base = Rect::from_corners(self.points[0], self.points[1]);
        let left = if self.extend.left { 0.0 } else { base.x };
        let right = if self.extend.right { self.pane_width.max(base.right()) } else { base.right() };
        Rect::new(left.min(base.x), base.y, right - left.min(base.x), base.height)
    }
}

/// Axis aligned box spanned by two corners
#[derive(Debug, Default)]
pub struct RectangleRenderer {
    data: Option<RectangleData>,
}

impl RectangleRenderer {
    pub fn set_data(&mut self, data: RectangleData) {
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&RectangleData> {
        self.data.as_ref()
    }
}

impl GeometricRenderer for RectangleRenderer {
    fn draw(&self, surface: &mut dyn Surface, _pixel_ratio: f64) {
        let Some(data) = &self.data else {
            return;
        };
        let rect = data.rect();
        if let Some(fill) = &data.fill {
            surface.set_fill_style(fill);
            surface.fill_rect(rect.x, rect.y, rect.width, rect.height);
        }
        if let Some(border) = &data.border {
            border.apply(surface);
            surface.begin_path();
            surface.rect(rect.x, rect.y, rect.width, rect.height);
            surface.stroke();
        }
    }

    fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        let rect = data.rect();
        if let Some(border) = &data.border {
            let corners = [
                Point::new(rect.x, rect.y),
                Point::new(rect.right(), rect.y),
                Point::new(rect.right(), rect.bottom()),
                Point::new(rect.x, rect.bottom()),
            ];
            let on_edge = (0..4).any(|i| {
                distance_to_segment(point, corners[i], corners[(i + 1) % 4]) <= data.tolerance + border.width / 2.0
            });
            if on_edge {
                return Some(HitTestResult::new(HitTestType::MovePoint));
            }
        }
        (data.hit_background && rect.contains(point)).then(|| HitTestResult::new(HitTestType::MovePointBackground))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_stretches_to_pane_edges() {
        let data = RectangleData::band(
            Point::new(100.0, 10.0),
            Point::new(200.0, 50.0),
            "red".into(),
            Extend { left: true, right: true },
            800.0,
            3.0,
        );
        assert_eq!(data.rect(), Rect::new(0.0, 10.0, 800.0, 40.0));
    }

    #[test]
    fn background_hit_needs_flag() {
        let mut renderer = RectangleRenderer::default();
        let mut data =
            RectangleData::band(Point::new(0.0, 0.0), Point::new(10.0, 10.0), "red".into(), Extend::NONE, 800.0, 3.0);
        renderer.set_data(data.clone());
        assert!(renderer.hit_test(Point::new(5.0, 5.0)).is_none());
        data.hit_background = true;
        renderer.set_data(data);
        assert_eq!(
            renderer.hit_test(Point::new(5.0, 5.0)).map(|r| r.hit_type),
            Some(HitTestType::MovePointBackground)
        );
    }
}
