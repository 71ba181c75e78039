use chart_line_tools::domain::chart::{CoordinateMapper, TimeRange, Viewport};

fn viewport() -> Viewport {
    Viewport::new(800, 600).with_ranges(0.0, 100.0, 0.0, 100.0)
}

#[test]
fn pan_moves_viewport() {
    let mut vp = viewport();
    vp.pan(0.1, 0.1);
    assert!((vp.start_time - 10.0).abs() < 1e-6);
    assert!((vp.end_time - 110.0).abs() < 1e-6);
    assert!((vp.min_price - 10.0).abs() < 1e-6);
    assert!((vp.max_price - 110.0).abs() < 1e-6);
}

#[test]
fn visible_range_follows_the_pan() {
    let mut vp = viewport();
    vp.pan(0.5, 0.0);
    assert_eq!(vp.visible_time_range(), Some(TimeRange::new(50, 150)));
}

#[test]
fn time_to_coordinate_scales_to_width() {
    let vp = Viewport::new(200, 100).with_ranges(0.0, 100.0, 0.0, 100.0);
    assert_eq!(vp.time_to_coordinate(50), Some(100.0));
    assert_eq!(vp.coordinate_to_time(100.0), 50);
}

#[test]
fn prices_grow_upwards() {
    let vp = viewport();
    let base = vp.first_value().unwrap_or_default();
    assert_eq!(vp.price_to_coordinate(100.0, base), Some(0.0));
    assert_eq!(vp.price_to_coordinate(0.0, base), Some(600.0));
}

#[test]
fn empty_window_maps_nothing() {
    let vp = Viewport::new(800, 600);
    assert!(vp.is_empty());
    assert_eq!(vp.time_to_coordinate(10), None);
    assert_eq!(vp.visible_time_range(), None);
    assert_eq!(vp.first_value(), None);
}

#[test]
fn non_finite_prices_are_unavailable() {
    let vp = viewport();
    assert_eq!(vp.price_to_coordinate(f64::NAN, 0.0), None);
}

#[test]
fn prices_round_to_precision() {
    let mut vp = viewport();
    vp.price_precision = 1;
    assert_eq!(vp.format_price(12.345, 0.0), 12.3);
    assert_eq!(vp.price_label(12.0, 0.0), "12.0");
}
