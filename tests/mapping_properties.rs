use chart_line_tools::domain::chart::{CoordinateMapper, Viewport};
use chart_line_tools::domain::geometry::Point;
use chart_line_tools::domain::line_tool::LineStyle;
use chart_line_tools::infrastructure::rendering::renderers::{
    ArcData, ArcRenderer, GeometricRenderer, LineData, SegmentData, SegmentRenderer,
};
use quickcheck_macros::quickcheck;

fn viewport() -> Viewport {
    Viewport::new(800, 600).with_ranges(1_000.0, 9_000.0, 50.0, 250.0)
}

#[quickcheck]
fn time_round_trips(offset: u16) -> bool {
    let vp = viewport();
    let t = 1_000 + i64::from(offset % 8_000);
    vp.time_to_coordinate(t).map(|x| vp.coordinate_to_time(x)) == Some(t)
}

#[quickcheck]
fn price_round_trips_within_rounding(cents: u16) -> bool {
    let vp = viewport();
    let base = vp.first_value().unwrap_or_default();
    let price = 50.0 + f64::from(cents % 20_000) / 100.0;
    let Some(y) = vp.price_to_coordinate(price, base) else {
        return false;
    };
    let back = vp.format_price(vp.coordinate_to_price(y, base), base);
    (back - price).abs() <= 0.005 + 1e-9
}

fn line(width: f64) -> LineData {
    LineData::new("#2962ff", width, LineStyle::Solid)
}

#[quickcheck]
fn segment_edges_hit_symmetrically(along: u8, tolerance: u8, width: u8) -> bool {
    // interpolated points sit a rounding error off the line
    let tolerance = 0.5 + f64::from(tolerance % 10);
    let width = f64::from(width % 5);
    let (a, b) = (Point::new(100.0, 300.0), Point::new(600.0, 300.0));
    let mut renderer = SegmentRenderer::default();
    renderer.set_data(SegmentData::new(a, b, line(width), (800.0, 600.0), tolerance));

    let on = a.lerp(b, f64::from(along) / 255.0);
    let reach = tolerance + width / 2.0 + 1e-3;
    let above = Point::new(on.x, on.y - reach);
    let below = Point::new(on.x, on.y + reach);
    renderer.hit_test(on).is_some() && renderer.hit_test(above).is_none() && renderer.hit_test(below).is_none()
}

#[quickcheck]
fn arc_edges_hit_symmetrically(angle: u16, radius: u8, tolerance: u8) -> bool {
    let radius = 20.0 + f64::from(radius);
    // the projected edge point carries rounding error
    let tolerance = 1.0 + f64::from(tolerance % 10);
    let center = Point::new(400.0, 300.0);
    let mut renderer = ArcRenderer::default();
    renderer.set_data(ArcData::full(center, radius, Some(line(1.0)), None, tolerance));

    let theta = f64::from(angle) / f64::from(u16::MAX) * std::f64::consts::TAU;
    let at = |r: f64| Point::new(center.x + r * theta.cos(), center.y + r * theta.sin());
    let outside = at(radius + tolerance + 1e-3);
    let inside = at(radius - tolerance - 1e-3);
    renderer.hit_test(at(radius)).is_some() && renderer.hit_test(outside).is_none() && renderer.hit_test(inside).is_none()
}
