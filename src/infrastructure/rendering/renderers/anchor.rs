use serde::Serialize;
use std::f64::consts::PI;

use super::GeometricRenderer;
use crate::domain::geometry::{AnchorPoint, Point};
use crate::domain::line_tool::{CursorType, HitTestData, HitTestResult, HitTestType};
use crate::infrastructure::rendering::surface::Surface;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorData {
    pub points: Vec<AnchorPoint>,
    /// Cursor per anchor, by position in `points`
    pub cursors: Vec<CursorType>,
    pub radius: f64,
    pub stroke_width: f64,
    pub hovered_stroke_width: f64,
    pub color: String,
    pub background: String,
    pub visible: bool,
    pub selected: bool,
    pub current_point: Option<Point>,
    pub edited_point_index: Option<usize>,
}

/// Draggable control points of one tool
#[derive(Debug, Default)]
pub struct LineAnchorRenderer {
    data: Option<AnchorData>,
}

impl LineAnchorRenderer {
    pub fn set_data(&mut self, data: AnchorData) {
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&AnchorData> {
        self.data.as_ref()
    }

    /// Refreshes the interaction dependent fields, keeping geometry
    pub fn update_state(
        &mut self,
        visible: bool,
        selected: bool,
        current_point: Option<Point>,
        edited_point_index: Option<usize>,
    ) {
        if let Some(data) = &mut self.data {
            data.visible = visible;
            data.selected = selected;
            data.current_point = current_point;
            data.edited_point_index = edited_point_index;
        }
    }

    fn is_emphasised(data: &AnchorData, anchor: &AnchorPoint) -> bool {
        if data.edited_point_index == Some(anchor.index) {
            return true;
        }
        data.current_point
            .is_some_and(|p| p.distance_to(anchor.point()) <= data.radius + data.hovered_stroke_width / 2.0)
    }
}

impl GeometricRenderer for LineAnchorRenderer {
    fn draw(&self, surface: &mut dyn Surface, _pixel_ratio: f64) {
        let Some(data) = &self.data else {
            return;
        };
        if !data.visible {
            return;
        }
        surface.save();
        surface.set_line_dash(&[]);
        for anchor in &data.points {
            let width = if Self::is_emphasised(data, anchor) { data.hovered_stroke_width } else { data.stroke_width };
            surface.begin_path();
            if anchor.square {
                let side = data.radius * 2.0;
                surface.rect(anchor.x - data.radius, anchor.y - data.radius, side, side);
            } else {
                surface.arc(anchor.x, anchor.y, data.radius, 0.0, 2.0 * PI, false);
            }
            surface.set_fill_style(&data.background);
            surface.fill();
            surface.set_stroke_style(&data.color);
            surface.set_line_width(width);
            surface.stroke();
        }
        surface.restore();
    }

    fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        if !data.visible {
            return None;
        }
        let reach = data.radius + data.hovered_stroke_width / 2.0;
        data.points.iter().enumerate().find_map(|(i, anchor)| {
            (point.distance_to(anchor.point()) <= reach).then(|| {
                HitTestResult::with_data(
                    HitTestType::ChangePoint,
                    HitTestData { point_index: Some(anchor.index), cursor: data.cursors.get(i).copied(), text_label: false },
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::rendering::surface::{DrawCommand, RecordingSurface};

    fn anchors(visible: bool) -> LineAnchorRenderer {
        let mut renderer = LineAnchorRenderer::default();
        renderer.set_data(AnchorData {
            points: vec![AnchorPoint::new(10.0, 10.0, 0), AnchorPoint::square(50.0, 50.0, 3)],
            cursors: vec![CursorType::Default, CursorType::VerticalResize],
            radius: 6.0,
            stroke_width: 1.0,
            hovered_stroke_width: 4.0,
            color: "#1E53E5".into(),
            background: "#ffffff".into(),
            visible,
            selected: true,
            current_point: Some(Point::new(51.0, 50.0)),
            edited_point_index: None,
        });
        renderer
    }

    #[test]
    fn reports_the_anchor_index_and_cursor() {
        let hit = anchors(true).hit_test(Point::new(53.0, 52.0)).expect("anchor hit");
        assert_eq!(hit.hit_type, HitTestType::ChangePoint);
        assert_eq!(hit.point_index(), Some(3));
        assert_eq!(hit.cursor(), Some(CursorType::VerticalResize));
    }

    #[test]
    fn hidden_anchors_neither_draw_nor_hit() {
        let renderer = anchors(false);
        assert!(renderer.hit_test(Point::new(10.0, 10.0)).is_none());
        let mut surface = RecordingSurface::new();
        renderer.draw(&mut surface, 1.0);
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn hovered_anchor_uses_the_wide_stroke() {
        let mut surface = RecordingSurface::new();
        anchors(true).draw(&mut surface, 1.0);
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::LineWidth(w) if *w == 4.0)), 1);
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Rect(..))), 1);
    }
}
