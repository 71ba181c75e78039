use chart_line_tools::application::StyleConfig;
use chart_line_tools::application::view::{Frame, LineToolView};
use chart_line_tools::domain::chart::Viewport;
use chart_line_tools::domain::line_tool::{DomainPoint, LineTool, LineToolOptions, LineToolType};
use insta::assert_json_snapshot;

#[test]
fn arrow_renderer_data() {
    let vp = Viewport::new(800, 600).with_ranges(0.0, 800.0, 0.0, 600.0);
    let style = StyleConfig::default();
    let tool = LineTool::with_points(
        "arrow",
        LineToolType::Arrow,
        LineToolOptions::for_type(LineToolType::Arrow),
        vec![DomainPoint::new(100, 300.0), DomainPoint::new(300, 450.0)],
    );
    let mut view = LineToolView::new(tool);
    view.update(&Frame { mapper: &vp, style: &style, pixel_ratio: 1.0 });
    let data = view.renderer_data();
    assert_json_snapshot!("arrow_segment", data);
}
