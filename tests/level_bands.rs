use chart_line_tools::application::StyleConfig;
use chart_line_tools::application::view::{Frame, LineToolView};
use chart_line_tools::domain::chart::Viewport;
use chart_line_tools::domain::line_tool::{DomainPoint, Level, LineTool, LineToolOptions, LineToolType};
use chart_line_tools::infrastructure::rendering::RendererData;

const ORDERINGS: [&[f64]; 6] = [
    &[0.0, 1.0],
    &[0.0, 0.5, 1.0],
    &[0.0, 0.382, 0.618, 1.0],
    &[0.0, 0.236, 0.5, 0.786, 1.0],
    &[0.0, 0.236, 0.382, 0.5, 0.618, 1.0],
    &[0.5, 0.0, 1.0, 0.236, 0.786, 0.382],
];

fn viewport() -> Viewport {
    Viewport::new(800, 600).with_ranges(0.0, 800.0, 0.0, 600.0)
}

fn build(tool_type: LineToolType, coeffs: &[f64], points: Vec<DomainPoint>) -> Vec<RendererData> {
    let mut options = LineToolOptions::for_type(tool_type);
    options.levels = coeffs.iter().map(|c| Level::new(*c, "#2962ff")).collect();
    let mut view = LineToolView::new(LineTool::with_points("fib", tool_type, options, points));
    let vp = viewport();
    let style = StyleConfig::default();
    view.update(&Frame { mapper: &vp, style: &style, pixel_ratio: 1.0 });
    view.renderer_data()
}

#[test]
fn retracement_bands_join_neighbouring_levels() {
    let vp = viewport();
    let (p1, p2) = (300.0, 400.0);
    for coeffs in ORDERINGS {
        let data = build(
            LineToolType::FibRetracement,
            coeffs,
            vec![DomainPoint::new(100, p1), DomainPoint::new(300, p2)],
        );
        let bands: Vec<_> = data
            .iter()
            .filter_map(|d| match d {
                RendererData::Rectangle(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(bands.len(), coeffs.len() - 1, "{:?}", coeffs);

        let y = |c: f64| vp.price_to_y(p2 + c * (p1 - p2));
        for (i, band) in bands.iter().enumerate() {
            assert_eq!(band.points[0].y, y(coeffs[i]), "{:?} band {}", coeffs, i);
            assert_eq!(band.points[1].y, y(coeffs[i + 1]), "{:?} band {}", coeffs, i);
        }
    }
}

#[test]
fn circle_bands_span_consecutive_radii() {
    for coeffs in ORDERINGS {
        let data = build(
            LineToolType::FibCircles,
            coeffs,
            vec![DomainPoint::new(100, 300.0), DomainPoint::new(200, 300.0)],
        );
        let rings: Vec<(f64, f64)> = data
            .iter()
            .filter_map(|d| match d {
                RendererData::Arc(arc) => arc.inner_radius.map(|inner| (inner, arc.radius_x)),
                _ => None,
            })
            .collect();
        assert_eq!(rings.len(), coeffs.len() - 1, "{:?}", coeffs);
        for (i, (inner, outer)) in rings.iter().enumerate() {
            let (a, b) = (coeffs[i] * 100.0, coeffs[i + 1] * 100.0);
            assert_eq!((*inner, *outer), (a.min(b), a.max(b)), "{:?} ring {}", coeffs, i);
        }
    }
}

#[test]
fn hidden_levels_leave_no_gap() {
    let mut options = LineToolOptions::for_type(LineToolType::FibRetracement);
    options.levels = vec![Level::new(0.0, "#000"), Level::new(0.5, "#000"), Level::new(1.0, "#000")];
    options.levels[1].visible = false;
    let mut view = LineToolView::new(LineTool::with_points(
        "fib",
        LineToolType::FibRetracement,
        options,
        vec![DomainPoint::new(100, 300.0), DomainPoint::new(300, 400.0)],
    ));
    let vp = viewport();
    let style = StyleConfig::default();
    view.update(&Frame { mapper: &vp, style: &style, pixel_ratio: 1.0 });
    let bands = view.renderer_data().into_iter().filter(|d| matches!(d, RendererData::Rectangle(_))).count();
    assert_eq!(bands, 1);
}
