use serde::Serialize;
use std::f64::consts::PI;

use super::{GeometricRenderer, LineData};
use crate::domain::geometry::Point;
use crate::domain::line_tool::{HitTestResult, HitTestType};
use crate::infrastructure::rendering::surface::Surface;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleData {
    pub center: Point,
    pub radius: f64,
    pub border: Option<LineData>,
    pub fill: Option<String>,
    pub hit_background: bool,
    pub tolerance: f64,
}

/// Circle around a centre point
#[derive(Debug, Default)]
pub struct CircleRenderer {
    data: Option<CircleData>,
}

impl CircleRenderer {
    pub fn set_data(&mut self, data: CircleData) {
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&CircleData> {
        self.data.as_ref()
    }
}

impl GeometricRenderer for CircleRenderer {
    fn draw(&self, surface: &mut dyn Surface, _pixel_ratio: f64) {
        let Some(data) = &self.data else {
            return;
        };
        if data.radius <= 0.0 {
            return;
        }
        surface.begin_path();
        surface.arc(data.center.x, data.center.y, data.radius, 0.0, 2.0 * PI, false);
        if let Some(fill) = &data.fill {
            surface.set_fill_style(fill);
            surface.fill();
        }
        if let Some(border) = &data.border {
            border.apply(surface);
            surface.stroke();
        }
    }

    fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        let distance = point.distance_to(data.center);
        let width = data.border.as_ref().map_or(0.0, |b| b.width);
        if (distance - data.radius).abs() <= data.tolerance + width / 2.0 {
            return Some(HitTestResult::new(HitTestType::MovePoint));
        }
        (data.hit_background && distance < data.radius).then(|| HitTestResult::new(HitTestType::MovePointBackground))
    }
}
