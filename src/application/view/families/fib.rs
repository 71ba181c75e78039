//! Fibonacci studies. Every tool draws one boundary per visible level and
//! fills the band between each level and the one before it in list order.

use std::f64::consts::PI;

use super::{BuildContext, Geometry};
use crate::domain::chart::apply_alpha;
use crate::domain::geometry::Point;
use crate::domain::line_tool::{BoxAlignment, BoxHorizontalAlignment, BoxVerticalAlignment, Extend, Level};
use crate::infrastructure::rendering::renderers::{
    ArcData, CircleData, LineData, PolygonData, RectangleData, RendererData, SpiralData,
};

const SPIRAL_FALLBACK_COLOR: &str = "#2962ff";
const WEDGE_LABEL_DISTANCE: f64 = 100.0;
const TIME_LABEL_Y: f64 = 10.0;

fn band_fill(level: &Level) -> String {
    apply_alpha(&level.color, level.opacity)
}

fn level_line(ctx: &BuildContext, level: &Level) -> LineData {
    LineData::from_line(&ctx.options().line).with_color(&level.color)
}

fn alignment(vertical: BoxVerticalAlignment, horizontal: BoxHorizontalAlignment) -> BoxAlignment {
    BoxAlignment::new(vertical, horizontal)
}

/// Starts a geometry with anchors on every placed point. Callers are only
/// reached with at least two points.
fn begin(ctx: &BuildContext) -> Option<(Geometry, Point, Point)> {
    let mut geometry = Geometry::default();
    geometry.anchors_from(ctx.screen);
    match ctx.screen {
        [a, b, ..] => Some((geometry, *a, *b)),
        _ => None,
    }
}

/// `>>>>{diff} from {coeff} line` when the referenced level exists and differs
fn distance_annotation(ctx: &BuildContext, level: &Level, price_of: impl Fn(f64) -> f64) -> Option<String> {
    if !level.distance_from_coeff_enabled {
        return None;
    }
    let reference = ctx.options().levels.iter().find(|l| l.coeff == level.distance_from_coeff)?;
    let current = ctx.mapper.format_price(price_of(level.coeff), ctx.base);
    let other = ctx.mapper.format_price(price_of(reference.coeff), ctx.base);
    let diff = ((current - other).abs() * 100_000.0).round() / 100_000.0;
    (diff > 0.0).then(|| format!(">>>>{} from {} line", diff, reference.coeff))
}

/// Horizontal price levels spanning the defining points
fn price_levels(ctx: &BuildContext, span: &[Point], price_of: impl Fn(f64) -> f64) -> Option<Vec<RendererData>> {
    let options = ctx.options();
    let min_x = span.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = span.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let mut renderers = Vec::new();
    let mut previous_y = None;
    for level in options.visible_levels() {
        let price = price_of(level.coeff);
        let y = ctx.price_to_y(price)?;
        let mut value = format!("{}({})", level.coeff, ctx.price_label(price));
        if let Some(distance) = distance_annotation(ctx, level, &price_of) {
            value = format!("{} {}", value, distance);
        }
        let start = Point::new(min_x, y);
        let end = Point::new(max_x, y);
        let label_alignment = alignment(BoxVerticalAlignment::Middle, BoxHorizontalAlignment::Right);
        renderers.push(ctx.level_label(value, &level.color, start, label_alignment));
        let line = ctx.segment(start, end, level_line(ctx, level)).extended(options.extend);
        renderers.push(RendererData::Segment(line));
        if let Some(previous_y) = previous_y {
            renderers.push(RendererData::Rectangle(RectangleData::band(
                Point::new(min_x, previous_y),
                end,
                band_fill(level),
                options.extend,
                ctx.width,
                ctx.style.hit_tolerance,
            )));
        }
        previous_y = Some(y);
    }
    Some(renderers)
}

pub fn retracement(ctx: &BuildContext) -> Option<Geometry> {
    let (mut geometry, a, b) = begin(ctx)?;
    let (p1, p2) = (ctx.points[0].price, ctx.points[1].price);
    geometry.push(ctx.guide(a, b));
    geometry.renderers.extend(price_levels(ctx, &[a, b], |coeff| p2 + coeff * (p1 - p2))?);
    Some(geometry)
}

pub fn extension(ctx: &BuildContext) -> Option<Geometry> {
    let (mut geometry, a, b) = begin(ctx)?;
    let (p1, p2) = (ctx.points[0].price, ctx.points[1].price);
    let p3 = ctx.points.get(2).map_or(p2, |p| p.price);
    geometry.push(ctx.guide(a, b));
    let span = match ctx.screen.get(2) {
        Some(&c) => {
            geometry.push(ctx.guide(b, c));
            vec![a, b, c]
        }
        None => vec![a, b],
    };
    geometry.renderers.extend(price_levels(ctx, &span, |coeff| p3 + coeff * (p2 - p1))?);
    Some(geometry)
}

pub fn channel(ctx: &BuildContext) -> Option<Geometry> {
    let (mut geometry, a, b) = begin(ctx)?;
    let options = ctx.options();
    let c = ctx.screen.get(2).copied().unwrap_or(a);
    let offset = c - a;
    let guide_line = LineData::new(&ctx.style.guide_color, options.line.width, options.line.style);
    geometry.push(RendererData::Segment(ctx.segment(a, b, guide_line).extended(options.extend)));

    let mut previous: Option<(Point, Point)> = None;
    for level in options.visible_levels() {
        let shift = offset.scaled(level.coeff);
        let (start, end) = (a + shift, b + shift);
        let label_alignment = alignment(BoxVerticalAlignment::Middle, BoxHorizontalAlignment::Right);
        geometry.push(ctx.level_label(level.coeff.to_string(), &level.color, start, label_alignment));
        geometry.push(RendererData::Segment(ctx.segment(start, end, level_line(ctx, level)).extended(options.extend)));
        if let Some((prev_start, prev_end)) = previous {
            let band = PolygonData::band(vec![prev_start, prev_end, end, start], band_fill(level), ctx.style.hit_tolerance);
            geometry.push(RendererData::Polygon(band));
        }
        previous = Some((start, end));
    }
    Some(geometry)
}

/// Vertical lines at interpolated times; the trend-based variant measures
/// from the third point
pub fn time_zone(ctx: &BuildContext, trend_based: bool) -> Option<Geometry> {
    let (mut geometry, a, b) = begin(ctx)?;
    let t1 = ctx.points[0].timestamp as f64;
    let t2 = ctx.points[1].timestamp as f64;
    let origin = if trend_based { ctx.points.get(2).map_or(t2, |p| p.timestamp as f64) } else { t1 };
    let dt = t2 - t1;
    geometry.push(ctx.guide(a, b));
    if let (true, Some(&c)) = (trend_based, ctx.screen.get(2)) {
        geometry.push(ctx.guide(b, c));
    }

    let mut previous_x = None;
    for level in ctx.options().visible_levels() {
        let x = ctx.time_to_x(origin + level.coeff * dt)?;
        let label_alignment = alignment(BoxVerticalAlignment::Top, BoxHorizontalAlignment::Center);
        geometry.push(ctx.level_label(level.coeff.to_string(), &level.color, Point::new(x, TIME_LABEL_Y), label_alignment));
        let line = ctx.segment(Point::new(x, 0.0), Point::new(x, ctx.height), level_line(ctx, level));
        geometry.push(RendererData::Segment(line));
        if let Some(previous_x) = previous_x {
            geometry.push(RendererData::Rectangle(RectangleData::band(
                Point::new(previous_x, 0.0),
                Point::new(x, ctx.height),
                band_fill(level),
                Extend::NONE,
                ctx.width,
                ctx.style.hit_tolerance,
            )));
        }
        previous_x = Some(x);
    }
    Some(geometry)
}

/// Rays from P1 to P2's time at prices interpolated between P1 and P2
pub fn fan(ctx: &BuildContext) -> Option<Geometry> {
    let (mut geometry, a, b) = begin(ctx)?;
    let p1 = ctx.points[0].price;
    let dp = ctx.points[1].price - p1;
    geometry.push(ctx.guide(a, b));

    let mut previous_end = None;
    for level in ctx.options().visible_levels() {
        let end = Point::new(b.x, ctx.price_to_y(p1 + level.coeff * dp)?);
        let label_alignment = alignment(BoxVerticalAlignment::Middle, BoxHorizontalAlignment::Right);
        geometry.push(ctx.level_label(level.coeff.to_string(), &level.color, end, label_alignment));
        geometry.push(RendererData::Segment(ctx.segment(a, end, level_line(ctx, level))));
        if let Some(previous_end) = previous_end {
            let band = PolygonData::band(vec![a, previous_end, end], band_fill(level), ctx.style.hit_tolerance);
            geometry.push(RendererData::Polygon(band));
        }
        previous_end = Some(end);
    }
    Some(geometry)
}

/// Concentric rings around P1; radii scale |P1P2| by each coefficient
fn rings(ctx: &BuildContext, arcs: bool) -> Option<Geometry> {
    let (mut geometry, center, edge) = begin(ctx)?;
    let base_radius = center.distance_to(edge);
    let tolerance = ctx.style.curve_tolerance();
    let mut previous_radius = None;
    for level in ctx.options().visible_levels() {
        let radius = level.coeff * base_radius;
        let border = Some(level_line(ctx, level));
        let boundary = if arcs {
            RendererData::Arc(ArcData::full(center, radius, border, None, tolerance))
        } else {
            RendererData::Circle(CircleData { center, radius, border, fill: None, hit_background: false, tolerance })
        };
        geometry.push(boundary);
        let label_alignment = alignment(BoxVerticalAlignment::Middle, BoxHorizontalAlignment::Center);
        let pivot = Point::new(center.x + radius, center.y);
        geometry.push(ctx.level_label(level.coeff.to_string(), &level.color, pivot, label_alignment));
        if let Some(previous_radius) = previous_radius {
            let (inner, outer) = if radius < previous_radius { (radius, previous_radius) } else { (previous_radius, radius) };
            let band = ArcData::full(center, outer, None, Some(band_fill(level)), tolerance).with_inner(inner);
            geometry.push(RendererData::Arc(band));
        }
        previous_radius = Some(radius);
    }
    geometry.push(ctx.guide(center, edge));
    Some(geometry)
}

pub fn arcs(ctx: &BuildContext) -> Option<Geometry> {
    rings(ctx, true)
}

pub fn circles(ctx: &BuildContext) -> Option<Geometry> {
    rings(ctx, false)
}

pub fn spiral(ctx: &BuildContext) -> Option<Geometry> {
    let (mut geometry, center, through) = begin(ctx)?;
    let options = ctx.options();
    let color = options.levels.iter().find(|l| l.visible).map_or(SPIRAL_FALLBACK_COLOR, |l| l.color.as_str());
    geometry.push(RendererData::Spiral(SpiralData {
        center,
        through,
        line: LineData::new(color, options.line.width, options.line.style),
        pixel_ratio: ctx.pixel_ratio,
        tolerance: ctx.style.curve_tolerance(),
    }));
    geometry.push(ctx.guide(center, through));
    Some(geometry)
}

/// Shortest signed turn from `from` to `to`
fn shortest_turn(from: f64, to: f64) -> f64 {
    let mut delta = to - from;
    while delta > PI {
        delta -= 2.0 * PI;
    }
    while delta < -PI {
        delta += 2.0 * PI;
    }
    delta
}

/// Rays from P1 at angles interpolated between P1→P2 and P1→P3
pub fn wedge(ctx: &BuildContext) -> Option<Geometry> {
    let (mut geometry, origin, b) = begin(ctx)?;
    let c = ctx.screen.get(2).copied().unwrap_or(b);
    let first = (b.y - origin.y).atan2(b.x - origin.x);
    let turn = shortest_turn(first, (c.y - origin.y).atan2(c.x - origin.x));
    if ctx.screen.len() < 3 {
        geometry.push(ctx.guide(origin, b));
    }
    let reach = ctx.width.hypot(ctx.height);
    let ray_end = |angle: f64, length: f64| Point::new(origin.x + angle.cos() * length, origin.y + angle.sin() * length);

    let mut previous_end = None;
    for level in ctx.options().visible_levels() {
        let angle = first + level.coeff * turn;
        let end = ray_end(angle, reach);
        geometry.push(RendererData::Segment(ctx.segment(origin, end, level_line(ctx, level))));
        let label_alignment = alignment(BoxVerticalAlignment::Middle, BoxHorizontalAlignment::Center);
        let pivot = ray_end(angle, WEDGE_LABEL_DISTANCE);
        geometry.push(ctx.level_label(level.coeff.to_string(), &level.color, pivot, label_alignment));
        if let Some(previous_end) = previous_end {
            let band = PolygonData::band(vec![origin, previous_end, end], band_fill(level), ctx.style.hit_tolerance);
            geometry.push(RendererData::Polygon(band));
        }
        previous_end = Some(end);
    }
    Some(geometry)
}

/// Rays from P1 through points interpolated along P2–P3
pub fn pitchfan(ctx: &BuildContext) -> Option<Geometry> {
    let (mut geometry, origin, b) = begin(ctx)?;
    let options = ctx.options();
    let c = ctx.screen.get(2).copied().unwrap_or(b);
    if ctx.screen.len() < 3 {
        geometry.push(ctx.guide(origin, b));
    }

    let mut previous_end = None;
    for level in options.visible_levels() {
        let end = b.lerp(c, level.coeff);
        geometry.push(RendererData::Segment(ctx.segment(origin, end, level_line(ctx, level)).extended(options.extend)));
        let label_alignment = alignment(BoxVerticalAlignment::Middle, BoxHorizontalAlignment::Center);
        geometry.push(ctx.level_label(level.coeff.to_string(), &level.color, end, label_alignment));
        if let Some(previous_end) = previous_end {
            let band = PolygonData::band(vec![origin, previous_end, end], band_fill(level), ctx.style.hit_tolerance);
            geometry.push(RendererData::Polygon(band));
        }
        previous_end = Some(end);
    }
    Some(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_turns_the_short_way() {
        let turn = shortest_turn(170f64.to_radians(), -170f64.to_radians());
        assert!((turn - 20f64.to_radians()).abs() < 1e-9);
        assert!((shortest_turn(0.0, 1.0) - 1.0).abs() < 1e-12);
    }
}
