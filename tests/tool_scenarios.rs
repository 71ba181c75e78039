use chart_line_tools::application::StyleConfig;
use chart_line_tools::application::view::{Frame, LineToolView, PointerInput};
use chart_line_tools::domain::chart::Viewport;
use chart_line_tools::domain::geometry::Point;
use chart_line_tools::domain::line_tool::{DomainPoint, LineTool, LineToolOptions, LineToolType};
use chart_line_tools::infrastructure::rendering::RendererData;

/// x equals the timestamp and y is `600 - price`
fn viewport() -> Viewport {
    Viewport::new(800, 600).with_ranges(0.0, 800.0, 0.0, 600.0)
}

fn assert_near(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-6, "{} is not {}", actual, expected);
}

fn view(tool_type: LineToolType, points: &[(i64, f64)]) -> LineToolView {
    let points = points.iter().map(|(t, p)| DomainPoint::new(*t, *p)).collect();
    LineToolView::new(LineTool::with_points("tool", tool_type, LineToolOptions::for_type(tool_type), points))
}

#[test]
fn circle_radius_follows_the_second_point() {
    let vp = viewport();
    let style = StyleConfig::default();
    let frame = Frame { mapper: &vp, style: &style, pixel_ratio: 1.0 };
    let mut circle = view(LineToolType::Circle, &[(100, 500.0), (150, 500.0)]);
    circle.update(&frame);

    let data = circle.renderer_data();
    let Some(RendererData::Circle(shape)) = data.first() else {
        panic!("expected a circle, got {:?}", data);
    };
    assert_near(shape.center.x, 100.0);
    assert_near(shape.center.y, 100.0);
    assert_near(shape.radius, 50.0);

    assert!(circle.hit_test(Point::new(150.0 + style.hit_tolerance, 100.0)).is_some());
    assert!(circle.hit_test(Point::new(200.0, 100.0)).is_none());
}

#[test]
fn dragging_the_stop_across_entry_flips_the_position() {
    let vp = viewport();
    let style = StyleConfig::default();
    let frame = Frame { mapper: &vp, style: &style, pixel_ratio: 1.0 };
    let mut position = view(LineToolType::LongShortPosition, &[(100, 100.0), (200, 90.0), (200, 130.0)]);
    position.update(&frame);
    assert!(position.tool().long_short().is_long);

    // select through the stop-loss box, then grab the stop anchor
    position.mouse_down(&frame, &PointerInput::at(150.0, 505.0));
    assert!(position.tool().selected());
    position.pressed_mouse_move(&frame, &PointerInput::at(200.0, 510.0));
    assert_eq!(position.edited_point_index(), Some(1));
    position.pressed_mouse_move(&frame, &PointerInput::at(200.0, 490.0));

    let points = position.tool().committed_points();
    assert_eq!(points[1].price, 110.0);
    assert_eq!(points[2], DomainPoint::new(200, 70.0));
    assert!(!position.tool().long_short().is_long);
    assert!(position.is_flipped());

    position.mouse_up(&frame);
    assert!(!position.is_flipped());
}

#[test]
fn lines_left_of_the_visible_range_are_not_built() {
    let style = StyleConfig::default();
    let mut flat = view(LineToolType::TrendLine, &[(10, 300.0), (20, 300.0)]);

    let later = Viewport::new(800, 600).with_ranges(100.0, 900.0, 0.0, 600.0);
    flat.update(&Frame { mapper: &later, style: &style, pixel_ratio: 1.0 });
    assert!(flat.composite().is_none());
    assert!(flat.anchors().is_empty());

    let mut panned = later.clone();
    panned.pan(-0.125, 0.0);
    flat.invalidate();
    flat.update_if_needed(&Frame { mapper: &panned, style: &style, pixel_ratio: 1.0 });
    assert!(flat.composite().is_some());
    assert_eq!(flat.anchors().len(), 2);
}

#[test]
fn extended_lines_survive_culling() {
    let style = StyleConfig::default();
    let vp = Viewport::new(800, 600).with_ranges(100.0, 900.0, 0.0, 600.0);
    let mut ray = view(LineToolType::Ray, &[(10, 300.0), (20, 300.0)]);
    ray.update(&Frame { mapper: &vp, style: &style, pixel_ratio: 1.0 });
    assert!(ray.composite().is_some());
}

#[test]
fn shift_drag_keeps_the_other_endpoint_level() {
    let vp = viewport();
    let style = StyleConfig::default();
    let frame = Frame { mapper: &vp, style: &style, pixel_ratio: 1.0 };
    let mut trend = view(LineToolType::TrendLine, &[(100, 300.0), (300, 400.0)]);
    trend.update(&frame);

    trend.mouse_down(&frame, &PointerInput::at(200.0, 250.0));
    trend.pressed_mouse_move(&frame, &PointerInput::at(100.0, 300.0));
    trend.pressed_mouse_move(&frame, &PointerInput::at(150.0, 350.0).with_shift());

    let points = trend.tool().committed_points();
    assert_eq!(points[0], DomainPoint::new(150, 400.0));
    assert_eq!(points[1], DomainPoint::new(300, 400.0));
    assert_near(trend.anchors()[1].y, 200.0);
}

#[test]
fn rebuilding_without_changes_is_idempotent() {
    use strum::IntoEnumIterator;

    let vp = viewport();
    let style = StyleConfig::default();
    let frame = Frame { mapper: &vp, style: &style, pixel_ratio: 1.0 };
    let points = [(100, 300.0), (300, 400.0), (500, 350.0)];
    for tool_type in LineToolType::iter() {
        let mut tool = view(tool_type, &points[..tool_type.points_count()]);
        tool.update(&frame);
        let first = tool.renderer_data();
        let anchors = tool.anchors().to_vec();
        tool.update(&frame);
        assert_eq!(first, tool.renderer_data(), "{}", tool_type);
        assert_eq!(anchors, tool.anchors(), "{}", tool_type);
    }
}
