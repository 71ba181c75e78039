//! Straight line tools: trend family, horizontal and vertical lines,
//! channel, callout and free text.

use super::{BuildContext, Geometry, pivot_along, segment_angle};
use crate::domain::geometry::{AnchorPoint, Point};
use crate::domain::line_tool::{BoxAlignment, BoxHorizontalAlignment, BoxVerticalAlignment, Extend};
use crate::infrastructure::rendering::renderers::{LineData, PolygonData, RendererData};

/// Label laid along the segment `a`-`b`, rotated with it
fn push_segment_label(ctx: &BuildContext, geometry: &mut Geometry, a: Point, b: Point) {
    let mut text = ctx.options().text.clone();
    text.text_box.angle = segment_angle(a, b);
    let pivot = pivot_along(a, b, text.text_box.alignment.horizontal);
    if let Some(label) = ctx.user_label(text, pivot) {
        geometry.push_label(label);
    }
}

pub fn trend_line(ctx: &BuildContext) -> Option<Geometry> {
    let mut geometry = Geometry::default();
    geometry.anchors_from(ctx.screen);
    let [a, b] = match ctx.screen {
        [a, b, ..] => [*a, *b],
        _ => return Some(geometry),
    };
    let line = &ctx.options().line;
    let segment = ctx.segment(a, b, LineData::from_line(line)).extended(line.extend).with_ends(line.end);
    geometry.push(RendererData::Segment(segment));
    push_segment_label(ctx, &mut geometry, a, b);
    Some(geometry)
}

pub fn horizontal_ray(ctx: &BuildContext) -> Option<Geometry> {
    let p = *ctx.screen.first()?;
    let mut geometry = Geometry::default();
    geometry.anchors_from(ctx.screen);
    let line = &ctx.options().line;
    let extend = Extend { left: false, right: true };
    let toward = Point::new(p.x + 1.0, p.y);
    geometry.push(RendererData::Segment(ctx.segment(p, toward, LineData::from_line(line)).extended(extend)));
    let end = Point::new(ctx.width.max(p.x), p.y);
    push_segment_label(ctx, &mut geometry, p, end);
    Some(geometry)
}

pub fn horizontal_line(ctx: &BuildContext) -> Option<Geometry> {
    let p = *ctx.screen.first()?;
    let line = &ctx.options().line;
    let start = if line.extend.left { Point::new(0.0, p.y) } else { p };
    let end = if line.extend.right { Point::new(ctx.width, p.y) } else { p };
    let mut geometry = Geometry::default();
    if start.x.floor() == end.x.floor() || start.x.max(end.x) <= 0.0 || end.x < start.x {
        return Some(geometry);
    }
    geometry.push(RendererData::Segment(ctx.segment(start, end, LineData::from_line(line))));
    push_segment_label(ctx, &mut geometry, start, end);
    geometry.anchors = if line.extend.left && line.extend.right {
        vec![AnchorPoint::square(ctx.width / 2.0, p.y, 0)]
    } else {
        vec![AnchorPoint::new(p.x, p.y, 0)]
    };
    Some(geometry)
}

pub fn vertical_line(ctx: &BuildContext) -> Option<Geometry> {
    let x = ctx.screen.first()?.x;
    let bottom = Point::new(x, ctx.height);
    let top = Point::new(x, 0.0);
    let mut geometry = Geometry::default();
    geometry.push(RendererData::Segment(ctx.segment(bottom, top, LineData::from_line(&ctx.options().line))));
    push_segment_label(ctx, &mut geometry, bottom, top);
    geometry.anchors = vec![AnchorPoint::square(x, ctx.height / 2.0, 0)];
    Some(geometry)
}

/// Vertical offset of `p` from the line through `a` and `b`
fn offset_from_line(a: Point, b: Point, p: Point) -> f64 {
    if (b.x - a.x).abs() < f64::EPSILON {
        return p.y - a.y;
    }
    let y_at = a.y + (b.y - a.y) * (p.x - a.x) / (b.x - a.x);
    p.y - y_at
}

pub fn parallel_channel(ctx: &BuildContext) -> Option<Geometry> {
    let mut geometry = Geometry::default();
    let (a, b) = match ctx.screen {
        [a, b, ..] => (*a, *b),
        _ => {
            geometry.anchors_from(ctx.screen);
            return Some(geometry);
        }
    };
    let options = ctx.options();
    let line = LineData::from_line(&options.line);
    let Some(&c) = ctx.screen.get(2) else {
        geometry.push(RendererData::Segment(ctx.segment(a, b, line).extended(options.line.extend)));
        geometry.anchors_from(ctx.screen);
        return Some(geometry);
    };

    let offset = Point::new(0.0, offset_from_line(a, b, c));
    let (a2, b2) = (a + offset, b + offset);
    if let Some(fill) = &options.shape.background {
        geometry.push(RendererData::Polygon(PolygonData {
            points: vec![a, b, b2, a2],
            line: None,
            fill: Some(fill.color.clone()),
            hit_background: true,
            tolerance: ctx.style.hit_tolerance,
        }));
    }
    geometry.push(RendererData::Segment(ctx.segment(a, b, line.clone()).extended(options.line.extend)));
    geometry.push(RendererData::Segment(ctx.segment(a2, b2, line).extended(options.line.extend)));
    push_segment_label(ctx, &mut geometry, a, b);
    geometry.anchors = vec![
        AnchorPoint::new(a.x, a.y, 0),
        AnchorPoint::new(b.x, b.y, 1),
        AnchorPoint::new(a2.x, a2.y, 2),
        AnchorPoint::new(b2.x, b2.y, 3),
    ];
    Some(geometry)
}

pub fn callout(ctx: &BuildContext) -> Option<Geometry> {
    let mut geometry = Geometry::default();
    geometry.anchors_from(ctx.screen);
    let (a, b) = match ctx.screen {
        [a, b, ..] => (*a, *b),
        _ => return Some(geometry),
    };
    let options = ctx.options();
    geometry.push(RendererData::Segment(ctx.segment(a, b, LineData::from_line(&options.line))));
    let mut text = options.text.clone();
    text.text_box.angle = 0.0;
    if let Some(label) = ctx.user_label(text, b) {
        geometry.push_label(label);
    }
    Some(geometry)
}

pub fn text(ctx: &BuildContext) -> Option<Geometry> {
    let p = *ctx.screen.first()?;
    let mut geometry = Geometry::default();
    geometry.anchors_from(ctx.screen);
    let mut text = ctx.options().text.clone();
    text.text_box.alignment = BoxAlignment::new(BoxVerticalAlignment::Top, BoxHorizontalAlignment::Center);
    if let Some(label) = ctx.user_label(text, p) {
        geometry.push_label(label);
    }
    Some(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_offset_follows_the_slope() {
        let d = offset_from_line(Point::new(0.0, 100.0), Point::new(100.0, 0.0), Point::new(50.0, 80.0));
        assert_eq!(d, 30.0);
        let vertical = offset_from_line(Point::new(10.0, 10.0), Point::new(10.0, 50.0), Point::new(10.0, 25.0));
        assert_eq!(vertical, 15.0);
    }
}
