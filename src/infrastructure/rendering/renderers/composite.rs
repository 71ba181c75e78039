use serde::Serialize;

use super::{
    ArcRenderer, CircleRenderer, GeometricRenderer, PolygonRenderer, RectangleRenderer, RendererData, RendererKind,
    SegmentRenderer, SpiralRenderer, TextRenderer, TriangleRenderer,
};
use crate::domain::geometry::Point;
use crate::domain::line_tool::HitTestResult;
use crate::infrastructure::rendering::surface::Surface;

const KINDS: usize = 8;

fn kind_index(kind: RendererKind) -> usize {
    match kind {
        RendererKind::Segment => 0,
        RendererKind::Polygon => 1,
        RendererKind::Rectangle => 2,
        RendererKind::Circle => 3,
        RendererKind::Arc => 4,
        RendererKind::Spiral => 5,
        RendererKind::Triangle => 6,
        RendererKind::Text => 7,
    }
}

/// Slot of one renderer inside a [`RendererArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RendererRef {
    pub kind: RendererKind,
    pub slot: usize,
}

/// Per-kind renderer pools owned by one view.
///
/// Pools only grow; a rebuild reuses slots from index 0 of every kind.
#[derive(Debug, Default)]
pub struct RendererArena {
    segments: Vec<SegmentRenderer>,
    polygons: Vec<PolygonRenderer>,
    rectangles: Vec<RectangleRenderer>,
    circles: Vec<CircleRenderer>,
    arcs: Vec<ArcRenderer>,
    spirals: Vec<SpiralRenderer>,
    triangles: Vec<TriangleRenderer>,
    texts: Vec<TextRenderer>,
}

fn grow<T: Default>(pool: &mut Vec<T>, len: usize) {
    if pool.len() < len {
        pool.resize_with(len, T::default);
    }
}

impl RendererArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_capacity(&mut self, kind: RendererKind, len: usize) {
        match kind {
            RendererKind::Segment => grow(&mut self.segments, len),
            RendererKind::Polygon => grow(&mut self.polygons, len),
            RendererKind::Rectangle => grow(&mut self.rectangles, len),
            RendererKind::Circle => grow(&mut self.circles, len),
            RendererKind::Arc => grow(&mut self.arcs, len),
            RendererKind::Spiral => grow(&mut self.spirals, len),
            RendererKind::Triangle => grow(&mut self.triangles, len),
            RendererKind::Text => grow(&mut self.texts, len),
        }
    }

    pub fn capacity(&self, kind: RendererKind) -> usize {
        match kind {
            RendererKind::Segment => self.segments.len(),
            RendererKind::Polygon => self.polygons.len(),
            RendererKind::Rectangle => self.rectangles.len(),
            RendererKind::Circle => self.circles.len(),
            RendererKind::Arc => self.arcs.len(),
            RendererKind::Spiral => self.spirals.len(),
            RendererKind::Triangle => self.triangles.len(),
            RendererKind::Text => self.texts.len(),
        }
    }

    /// Loads `items` into pooled renderers and returns them in draw order
    pub fn compose(&mut self, items: Vec<RendererData>) -> CompositeRenderer {
        let mut used = [0usize; KINDS];
        let mut refs = Vec::with_capacity(items.len());
        for item in items {
            let kind = item.kind();
            let slot = used[kind_index(kind)];
            used[kind_index(kind)] += 1;
            self.ensure_capacity(kind, slot + 1);
            match item {
                RendererData::Segment(data) => self.segments[slot].set_data(data),
                RendererData::Polygon(data) => self.polygons[slot].set_data(data),
                RendererData::Rectangle(data) => self.rectangles[slot].set_data(data),
                RendererData::Circle(data) => self.circles[slot].set_data(data),
                RendererData::Arc(data) => self.arcs[slot].set_data(data),
                RendererData::Spiral(data) => self.spirals[slot].set_data(data),
                RendererData::Triangle(data) => self.triangles[slot].set_data(data),
                RendererData::Text(data) => self.texts[slot].set_data(data),
            }
            refs.push(RendererRef { kind, slot });
        }
        CompositeRenderer { items: refs }
    }

    pub fn renderer(&self, item: RendererRef) -> Option<&dyn GeometricRenderer> {
        let slot = item.slot;
        match item.kind {
            RendererKind::Segment => self.segments.get(slot).map(|r| r as &dyn GeometricRenderer),
            RendererKind::Polygon => self.polygons.get(slot).map(|r| r as &dyn GeometricRenderer),
            RendererKind::Rectangle => self.rectangles.get(slot).map(|r| r as &dyn GeometricRenderer),
            RendererKind::Circle => self.circles.get(slot).map(|r| r as &dyn GeometricRenderer),
            RendererKind::Arc => self.arcs.get(slot).map(|r| r as &dyn GeometricRenderer),
            RendererKind::Spiral => self.spirals.get(slot).map(|r| r as &dyn GeometricRenderer),
            RendererKind::Triangle => self.triangles.get(slot).map(|r| r as &dyn GeometricRenderer),
            RendererKind::Text => self.texts.get(slot).map(|r| r as &dyn GeometricRenderer),
        }
    }

    pub fn text(&self, slot: usize) -> Option<&TextRenderer> {
        self.texts.get(slot)
    }

    fn data(&self, item: RendererRef) -> Option<RendererData> {
        let slot = item.slot;
        match item.kind {
            RendererKind::Segment => self.segments.get(slot)?.data().cloned().map(RendererData::Segment),
            RendererKind::Polygon => self.polygons.get(slot)?.data().cloned().map(RendererData::Polygon),
            RendererKind::Rectangle => self.rectangles.get(slot)?.data().cloned().map(RendererData::Rectangle),
            RendererKind::Circle => self.circles.get(slot)?.data().cloned().map(RendererData::Circle),
            RendererKind::Arc => self.arcs.get(slot)?.data().cloned().map(RendererData::Arc),
            RendererKind::Spiral => self.spirals.get(slot)?.data().cloned().map(RendererData::Spiral),
            RendererKind::Triangle => self.triangles.get(slot)?.data().cloned().map(RendererData::Triangle),
            RendererKind::Text => self.texts.get(slot)?.data().cloned().map(RendererData::Text),
        }
    }
}

/// Ordered renderers of one tool: drawn first to last, hit tested in the
/// same order with the first positive match winning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeRenderer {
    items: Vec<RendererRef>,
}

impl CompositeRenderer {
    pub fn items(&self) -> &[RendererRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn draw(&self, arena: &RendererArena, surface: &mut dyn Surface, pixel_ratio: f64) {
        for item in &self.items {
            if let Some(renderer) = arena.renderer(*item) {
                renderer.draw(surface, pixel_ratio);
            }
        }
    }

    pub fn hit_test(&self, arena: &RendererArena, point: Point) -> Option<HitTestResult> {
        self.items.iter().find_map(|item| arena.renderer(*item)?.hit_test(point))
    }

    /// Data records in draw order
    pub fn data(&self, arena: &RendererArena) -> Vec<RendererData> {
        self.items.iter().filter_map(|item| arena.data(*item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_tool::{HitTestType, LineStyle};
    use crate::infrastructure::rendering::renderers::{CircleData, LineData, SegmentData};

    fn segment(y: f64) -> RendererData {
        RendererData::Segment(SegmentData::new(
            Point::new(0.0, y),
            Point::new(100.0, y),
            LineData::new("#000", 1.0, LineStyle::Solid),
            (800.0, 600.0),
            3.0,
        ))
    }

    #[test]
    fn slots_are_reused_across_rebuilds() {
        let mut arena = RendererArena::new();
        let first = arena.compose(vec![segment(0.0), segment(10.0), segment(20.0)]);
        assert_eq!(first.len(), 3);
        let second = arena.compose(vec![segment(5.0)]);
        assert_eq!(second.items()[0], RendererRef { kind: RendererKind::Segment, slot: 0 });
        assert_eq!(arena.capacity(RendererKind::Segment), 3);
    }

    #[test]
    fn first_match_in_list_order_wins() {
        let mut arena = RendererArena::new();
        let composite = arena.compose(vec![
            RendererData::Circle(CircleData {
                center: Point::new(50.0, 0.0),
                radius: 20.0,
                border: None,
                fill: None,
                hit_background: true,
                tolerance: 3.0,
            }),
            segment(0.0),
        ]);
        let hit = composite.hit_test(&arena, Point::new(50.0, 0.0));
        assert_eq!(hit.map(|h| h.hit_type), Some(HitTestType::MovePointBackground));
    }
}
