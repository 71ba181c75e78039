//! Closed shapes: rectangle, price range, circle and triangle.

use super::{BuildContext, Geometry, label_on_box};
use crate::domain::geometry::{AnchorPoint, Point, Rect};
use crate::domain::line_tool::{
    BoxAlignment, BoxHorizontalAlignment, BoxVerticalAlignment, CursorType, LineEnd, LineEnds, ShapeOptions,
    TextOptions,
};
use crate::infrastructure::rendering::renderers::{
    CircleData, LineData, RectangleData, RendererData, TextData, TriangleData,
};

fn border(shape: &ShapeOptions) -> Option<LineData> {
    (shape.border.width > 0.0).then(|| LineData::from_border(&shape.border))
}

fn fill(shape: &ShapeOptions) -> Option<String> {
    shape.background.as_ref().map(|fill| fill.color.clone())
}

/// User label placed on `bounds`
fn push_box_label(ctx: &BuildContext, geometry: &mut Geometry, bounds: Rect) {
    let (text, pivot) = label_on_box(&ctx.options().text, bounds, true);
    if let Some(label) = ctx.user_label(text, pivot) {
        geometry.push_label(label);
    }
}

/// Resize cursor of a corner, judged against the opposite corner
fn corner_cursor(corner: Point, opposite: Point) -> CursorType {
    if (corner.x - opposite.x) * (corner.y - opposite.y) >= 0.0 {
        CursorType::DiagonalNwSeResize
    } else {
        CursorType::DiagonalNeSwResize
    }
}

pub fn rectangle(ctx: &BuildContext, price_range: bool) -> Option<Geometry> {
    let mut geometry = Geometry::default();
    let (a, b) = match ctx.screen {
        [a, b, ..] => (*a, *b),
        _ => {
            geometry.anchors_from(ctx.screen);
            return Some(geometry);
        }
    };
    let shape = &ctx.options().shape;
    let data = RectangleData {
        points: [a, b],
        border: border(shape),
        fill: fill(shape),
        extend: shape.extend,
        hit_background: true,
        pane_width: ctx.width,
        tolerance: ctx.style.hit_tolerance,
    };
    let bounds = data.rect();
    geometry.push(RendererData::Rectangle(data));
    if price_range {
        push_price_range_measure(ctx, &mut geometry, a, b);
    }
    push_box_label(ctx, &mut geometry, bounds);

    let corners = [a, b, Point::new(a.x, b.y), Point::new(b.x, a.y)];
    let opposite = [1, 0, 3, 2];
    geometry.anchors = corners.iter().enumerate().map(|(i, p)| AnchorPoint::new(p.x, p.y, i)).collect();
    geometry.cursors = corners.iter().zip(opposite).map(|(p, o)| corner_cursor(*p, corners[o])).collect();
    Some(geometry)
}

/// Vertical arrow through the middle of the box plus the price delta text
fn push_price_range_measure(ctx: &BuildContext, geometry: &mut Geometry, a: Point, b: Point) {
    let (Some(from), Some(to)) = (ctx.points.first(), ctx.points.get(1)) else {
        return;
    };
    let x = (a.x + b.x) / 2.0;
    let start = Point::new(x, a.y);
    let end = Point::new(x, b.y);
    let line = LineData::from_border(&ctx.options().shape.border);
    let ends = LineEnds { left: LineEnd::Normal, right: LineEnd::Arrow };
    geometry.push(RendererData::Segment(ctx.segment(start, end, line).with_ends(ends)));

    let delta = to.price - from.price;
    let sign = if delta < 0.0 { "-" } else { "+" };
    let percent = if from.price == 0.0 { 0.0 } else { delta / from.price * 100.0 };
    let value = format!("{}{} ({}{:.2}%)", sign, ctx.price_label(delta.abs()), sign, percent.abs());
    let vertical = if end.y <= start.y { BoxVerticalAlignment::Bottom } else { BoxVerticalAlignment::Top };
    let font = ctx.options().text.font.clone();
    let text = TextOptions::label(value, font, BoxAlignment::new(vertical, BoxHorizontalAlignment::Center));
    geometry.push(RendererData::Text(TextData::new(text, end)));
}

pub fn circle(ctx: &BuildContext) -> Option<Geometry> {
    let mut geometry = Geometry::default();
    let (center, through) = match ctx.screen {
        [a, b, ..] => (*a, *b),
        _ => return Some(geometry),
    };
    let shape = &ctx.options().shape;
    let radius = center.distance_to(through);
    geometry.push(RendererData::Circle(CircleData {
        center,
        radius,
        border: border(shape),
        fill: fill(shape),
        hit_background: false,
        tolerance: ctx.style.hit_tolerance,
    }));
    let bounds = Rect::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius);
    push_box_label(ctx, &mut geometry, bounds);
    geometry.anchors_from(&[center, through]);
    geometry.cursors = vec![CursorType::Default, CursorType::DiagonalNwSeResize];
    Some(geometry)
}

pub fn triangle(ctx: &BuildContext) -> Option<Geometry> {
    let mut geometry = Geometry::default();
    geometry.anchors_from(ctx.screen);
    if ctx.screen.len() < 2 {
        return Some(geometry);
    }
    let shape = &ctx.options().shape;
    geometry.push(RendererData::Triangle(TriangleData {
        points: ctx.screen.to_vec(),
        border: border(shape),
        fill: fill(shape),
        hit_background: true,
        tolerance: ctx.style.hit_tolerance,
    }));
    if let Some(bounds) = Rect::bounding(ctx.screen) {
        push_box_label(ctx, &mut geometry, bounds);
    }
    Some(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_cursors_follow_the_diagonal() {
        let top_left = Point::new(0.0, 0.0);
        let bottom_right = Point::new(10.0, 10.0);
        assert_eq!(corner_cursor(top_left, bottom_right), CursorType::DiagonalNwSeResize);
        assert_eq!(corner_cursor(Point::new(10.0, 0.0), Point::new(0.0, 10.0)), CursorType::DiagonalNeSwResize);
    }
}
