use serde::Serialize;
use std::f64::consts::PI;

use super::{GeometricRenderer, LineData, stroke_path};
use crate::domain::geometry::{Point, distance_to_segment};
use crate::domain::line_tool::{HitTestResult, HitTestType};
use crate::infrastructure::rendering::surface::Surface;

const THETA_LIMIT: f64 = 20.0 * PI;
const THETA_STEP: f64 = 0.1;
const MAX_RADIUS: f64 = 3000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpiralData {
    pub center: Point,
    pub through: Point,
    pub line: LineData,
    pub pixel_ratio: f64,
    pub tolerance: f64,
}

/// Golden logarithmic spiral through `through`, winding out of `center`.
///
/// The polyline is sampled once per `set_data` and shared by draw and hit test.
#[derive(Debug, Default)]
pub struct SpiralRenderer {
    data: Option<SpiralData>,
    samples: Vec<Point>,
}

impl SpiralRenderer {
    pub fn set_data(&mut self, data: SpiralData) {
        self.samples = sample_spiral(&data);
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&SpiralData> {
        self.data.as_ref()
    }

    pub fn samples(&self) -> &[Point] {
        &self.samples
    }
}

fn sample_spiral(data: &SpiralData) -> Vec<Point> {
    let offset = data.through - data.center;
    let start_radius = offset.length();
    if start_radius == 0.0 {
        return Vec::new();
    }
    let start_angle = offset.y.atan2(offset.x);
    let golden = (1.0 + 5f64.sqrt()) / 2.0;
    let growth = golden.ln() / (PI / 2.0);
    let max_radius = MAX_RADIUS * data.pixel_ratio.max(1.0);

    let mut points = Vec::new();
    let mut theta = -THETA_LIMIT;
    while theta < THETA_LIMIT {
        let r = start_radius * (growth * theta).exp();
        if theta < 0.0 && r < 0.5 {
            theta += THETA_STEP;
            continue;
        }
        let angle = start_angle + theta;
        points.push(Point::new(data.center.x + r * angle.cos(), data.center.y + r * angle.sin()));
        if r > max_radius {
            break;
        }
        theta += THETA_STEP;
    }
    points
}

impl GeometricRenderer for SpiralRenderer {
    fn draw(&self, surface: &mut dyn Surface, _pixel_ratio: f64) {
        let Some(data) = &self.data else {
            return;
        };
        if self.samples.len() < 2 {
            return;
        }
        data.line.apply(surface);
        stroke_path(surface, &self.samples, false);
        surface.stroke();
    }

    fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        self.samples
            .windows(2)
            .any(|w| distance_to_segment(point, w[0], w[1]) <= data.tolerance)
            .then(|| HitTestResult::new(HitTestType::MovePoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_tool::LineStyle;

    fn spiral() -> SpiralRenderer {
        let mut renderer = SpiralRenderer::default();
        renderer.set_data(SpiralData {
            center: Point::new(400.0, 300.0),
            through: Point::new(500.0, 300.0),
            line: LineData::new("#2962ff", 1.0, LineStyle::Solid),
            pixel_ratio: 1.0,
            tolerance: 5.0,
        });
        renderer
    }

    #[test]
    fn passes_through_the_second_point() {
        let renderer = spiral();
        assert!(renderer.hit_test(Point::new(500.0, 300.0)).is_some());
    }

    #[test]
    fn sampling_stops_past_the_radius_limit() {
        let renderer = spiral();
        let center = Point::new(400.0, 300.0);
        let last = renderer.samples().last().map(|p| p.distance_to(center)).unwrap_or_default();
        assert!(last > MAX_RADIUS);
        assert!(renderer.samples().iter().all(|p| p.distance_to(center) >= 0.5));
    }

    #[test]
    fn coincident_points_produce_nothing() {
        let mut renderer = SpiralRenderer::default();
        renderer.set_data(SpiralData {
            center: Point::new(1.0, 1.0),
            through: Point::new(1.0, 1.0),
            line: LineData::new("#2962ff", 1.0, LineStyle::Solid),
            pixel_ratio: 1.0,
            tolerance: 5.0,
        });
        assert!(renderer.samples().is_empty());
        assert!(renderer.hit_test(Point::new(1.0, 1.0)).is_none());
    }
}
