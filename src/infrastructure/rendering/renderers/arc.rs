use serde::Serialize;
use std::f64::consts::PI;

use super::{GeometricRenderer, LineData};
use crate::domain::geometry::{Point, is_angle_between};
use crate::domain::line_tool::{HitTestResult, HitTestType};
use crate::infrastructure::rendering::surface::Surface;

/// Elliptical arc, optionally a ring when `inner_radius` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcData {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub inner_radius: Option<f64>,
    pub inner_radius_y: Option<f64>,
    pub start_angle: f64,
    pub end_angle: f64,
    pub border: Option<LineData>,
    pub fill: Option<String>,
    pub hit_background: bool,
    pub tolerance: f64,
}

impl ArcData {
    /// Full circle of `radius` around `center`
    pub fn full(center: Point, radius: f64, border: Option<LineData>, fill: Option<String>, tolerance: f64) -> Self {
        Self {
            center,
            radius_x: radius,
            radius_y: radius,
            inner_radius: None,
            inner_radius_y: None,
            start_angle: 0.0,
            end_angle: 2.0 * PI,
            border,
            fill,
            hit_background: false,
            tolerance,
        }
    }

    pub fn with_inner(mut self, inner_radius: f64) -> Self {
        self.inner_radius = Some(inner_radius);
        self
    }

    fn spans_full_turn(&self) -> bool {
        (self.end_angle - self.start_angle).abs() >= 2.0 * PI - 1e-9
    }

    fn inner_radii(&self) -> Option<(f64, f64)> {
        let inner = self.inner_radius?;
        let inner_y = self.inner_radius_y.unwrap_or(inner * (self.radius_y / self.radius_x));
        Some((inner, inner_y))
    }
}

#[derive(Debug, Default)]
pub struct ArcRenderer {
    data: Option<ArcData>,
}

impl ArcRenderer {
    pub fn set_data(&mut self, data: ArcData) {
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&ArcData> {
        self.data.as_ref()
    }
}

fn normalized_distance(dx: f64, dy: f64, rx: f64, ry: f64) -> f64 {
    ((dx / rx).powi(2) + (dy / ry).powi(2)).sqrt()
}

impl GeometricRenderer for ArcRenderer {
    fn draw(&self, surface: &mut dyn Surface, _pixel_ratio: f64) {
        let Some(data) = &self.data else {
            return;
        };
        let Point { x, y } = data.center;
        surface.save();
        if let Some(fill) = &data.fill {
            surface.set_fill_style(fill);
            surface.begin_path();
            match data.inner_radii().filter(|(ix, iy)| *ix > 0.0 || *iy > 0.0) {
                Some((ix, iy)) => {
                    surface.ellipse(x, y, data.radius_x, data.radius_y, data.start_angle, data.end_angle, false);
                    surface.ellipse(x, y, ix, iy, data.end_angle, data.start_angle, true);
                }
                None => {
                    surface.move_to(x, y);
                    surface.ellipse(x, y, data.radius_x, data.radius_y, data.start_angle, data.end_angle, false);
                }
            }
            surface.close_path();
            surface.fill();
        }
        if let Some(border) = data.border.as_ref().filter(|b| b.width > 0.0) {
            border.apply(surface);
            surface.begin_path();
            surface.ellipse(x, y, data.radius_x, data.radius_y, data.start_angle, data.end_angle, false);
            surface.stroke();
        }
        surface.restore();
    }

    fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        let (rx, ry) = (data.radius_x, data.radius_y);
        if rx < 0.5 || ry < 0.5 {
            return None;
        }
        let d = point - data.center;
        if !data.spans_full_turn() && !is_angle_between(d.y.atan2(d.x), data.start_angle, data.end_angle) {
            return None;
        }

        let outer = normalized_distance(d.x, d.y, rx, ry);
        if (outer - 1.0).abs() <= data.tolerance / rx.min(ry) {
            return Some(HitTestResult::new(HitTestType::MovePoint));
        }

        match data.inner_radii() {
            Some((irx, iry)) => {
                if irx <= 0.5 || iry <= 0.5 {
                    return None;
                }
                let inner = normalized_distance(d.x, d.y, irx, iry);
                if (inner - 1.0).abs() <= data.tolerance / irx.min(iry) {
                    return Some(HitTestResult::new(HitTestType::MovePoint));
                }
                (data.hit_background && outer < 1.0 && inner > 1.0)
                    .then(|| HitTestResult::new(HitTestType::MovePointBackground))
            }
            None => (data.hit_background && outer < 1.0).then(|| HitTestResult::new(HitTestType::MovePointBackground)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_tool::LineStyle;

    fn half_ring() -> ArcRenderer {
        let mut data = ArcData::full(
            Point::new(0.0, 0.0),
            100.0,
            Some(LineData::new("#000", 1.0, LineStyle::Solid)),
            Some("red".into()),
            5.0,
        )
        .with_inner(50.0);
        data.start_angle = 0.0;
        data.end_angle = PI;
        data.hit_background = true;
        let mut renderer = ArcRenderer::default();
        renderer.set_data(data);
        renderer
    }

    #[test]
    fn outer_and_inner_edges_hit() {
        let renderer = half_ring();
        let outer = renderer.hit_test(Point::new(0.0, 101.0)).map(|r| r.hit_type);
        let inner = renderer.hit_test(Point::new(0.0, 52.0)).map(|r| r.hit_type);
        assert_eq!(outer, Some(HitTestType::MovePoint));
        assert_eq!(inner, Some(HitTestType::MovePoint));
    }

    #[test]
    fn ring_interior_is_background() {
        let renderer = half_ring();
        let hit = renderer.hit_test(Point::new(0.0, 75.0)).map(|r| r.hit_type);
        assert_eq!(hit, Some(HitTestType::MovePointBackground));
        assert!(renderer.hit_test(Point::new(0.0, 20.0)).is_none());
    }

    #[test]
    fn points_outside_the_sweep_miss() {
        let renderer = half_ring();
        assert!(renderer.hit_test(Point::new(0.0, -100.0)).is_none());
    }

    #[test]
    fn wrapping_sweep_is_respected() {
        let mut data = ArcData::full(Point::new(0.0, 0.0), 100.0, None, None, 5.0);
        data.start_angle = 1.5 * PI;
        data.end_angle = 0.5 * PI;
        let mut renderer = ArcRenderer::default();
        renderer.set_data(data);
        assert!(renderer.hit_test(Point::new(100.0, 0.0)).is_some());
        assert!(renderer.hit_test(Point::new(-100.0, 0.0)).is_none());
    }
}
