use serde::Serialize;
use std::f64::consts::PI;

use super::{GeometricRenderer, LineData};
use crate::domain::geometry::{Point, distance_to_segment, extend_segment};
use crate::domain::line_tool::{Extend, HitTestResult, HitTestType, LineEnd, LineEnds};
use crate::infrastructure::rendering::surface::Surface;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentData {
    pub points: [Point; 2],
    pub line: LineData,
    pub extend: Extend,
    pub ends: LineEnds,
    pub pane_width: f64,
    pub pane_height: f64,
    pub tolerance: f64,
}

impl SegmentData {
    pub fn new(a: Point, b: Point, line: LineData, pane: (f64, f64), tolerance: f64) -> Self {
        Self {
            points: [a, b],
            line,
            extend: Extend::NONE,
            ends: LineEnds::default(),
            pane_width: pane.0,
            pane_height: pane.1,
            tolerance,
        }
    }

    pub fn extended(mut self, extend: Extend) -> Self {
        self.extend = extend;
        self
    }

    pub fn with_ends(mut self, ends: LineEnds) -> Self {
        self.ends = ends;
        self
    }
}

/// Straight line between two points, optionally extended to the pane edges
#[derive(Debug, Default)]
pub struct SegmentRenderer {
    data: Option<SegmentData>,
}

impl SegmentRenderer {
    pub fn set_data(&mut self, data: SegmentData) {
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&SegmentData> {
        self.data.as_ref()
    }

    fn visible_segment(data: &SegmentData) -> Option<(Point, Point)> {
        let [a, b] = data.points;
        extend_segment(a, b, data.extend.left, data.extend.right, data.pane_width, data.pane_height)
    }
}

fn draw_end(surface: &mut dyn Surface, end: LineEnd, tip: Point, from: Point, width: f64) {
    match end {
        LineEnd::Normal => {}
        LineEnd::Arrow => {
            let dir = tip - from;
            let len = dir.length();
            if len == 0.0 {
                return;
            }
            let head = (width * 4.0).max(8.0);
            let angle = dir.y.atan2(dir.x);
            surface.begin_path();
            for side in [-1.0, 1.0] {
                let a = angle + PI + side * PI / 6.0;
                surface.move_to(tip.x + head * a.cos(), tip.y + head * a.sin());
                surface.line_to(tip.x, tip.y);
            }
            surface.stroke();
        }
        LineEnd::Circle => {
            surface.begin_path();
            surface.arc(tip.x, tip.y, (width * 2.5).max(3.0), 0.0, 2.0 * PI, false);
            surface.stroke();
        }
    }
}

impl GeometricRenderer for SegmentRenderer {
    fn draw(&self, surface: &mut dyn Surface, _pixel_ratio: f64) {
        let Some(data) = &self.data else {
            return;
        };
        let Some((start, end)) = Self::visible_segment(data) else {
            return;
        };
        data.line.apply(surface);
        surface.begin_path();
        surface.move_to(start.x, start.y);
        surface.line_to(end.x, end.y);
        surface.stroke();

        surface.set_line_dash(&[]);
        draw_end(surface, data.ends.left, start, end, data.line.width);
        draw_end(surface, data.ends.right, end, start, data.line.width);
    }

    fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        let (start, end) = Self::visible_segment(data)?;
        (distance_to_segment(point, start, end) <= data.tolerance + data.line.width / 2.0)
            .then(|| HitTestResult::new(HitTestType::MovePoint))
    }
}
