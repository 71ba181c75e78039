//! Per-family geometry: pure functions from projected anchors and options
//! to renderer data records.

mod fib;
mod lines;
mod long_short;
mod shapes;

use crate::application::style::StyleConfig;
use crate::domain::chart::CoordinateMapper;
use crate::domain::geometry::{AnchorPoint, Point, Rect};
use crate::domain::line_tool::{
    BoxAlignment, BoxHorizontalAlignment, BoxVerticalAlignment, CursorType, DomainPoint, FontOptions,
    LineStyle, LineTool, LineToolOptions, LineToolType, Padding, TextOptions,
};
use crate::infrastructure::rendering::renderers::{LineData, RendererData, SegmentData, TextData};

/// Everything a family needs to lay out one frame
pub struct BuildContext<'a> {
    pub tool: &'a LineTool,
    /// Domain points including the creation preview
    pub points: &'a [DomainPoint],
    /// Projection of `points`, same length
    pub screen: &'a [Point],
    pub mapper: &'a dyn CoordinateMapper,
    pub base: f64,
    pub style: &'a StyleConfig,
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
    /// The user label is open in the text editor
    pub label_hidden: bool,
}

/// Output of one family build
#[derive(Debug, Default)]
pub struct Geometry {
    pub renderers: Vec<RendererData>,
    pub anchors: Vec<AnchorPoint>,
    /// Cursor per anchor; missing entries fall back to the hover cursor
    pub cursors: Vec<CursorType>,
    /// Position in `renderers` of the editable label
    pub label: Option<usize>,
}

impl Geometry {
    fn push(&mut self, data: RendererData) {
        self.renderers.push(data);
    }

    fn push_label(&mut self, data: TextData) {
        self.label = Some(self.renderers.len());
        self.renderers.push(RendererData::Text(data));
    }

    fn anchors_from(&mut self, screen: &[Point]) {
        self.anchors = screen.iter().enumerate().map(|(i, p)| AnchorPoint::new(p.x, p.y, i)).collect();
    }
}

impl BuildContext<'_> {
    pub fn options(&self) -> &LineToolOptions {
        self.tool.options()
    }

    fn pane(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn segment(&self, a: Point, b: Point, line: LineData) -> SegmentData {
        SegmentData::new(a, b, line, self.pane(), self.style.hit_tolerance)
    }

    /// Dashed gray line joining the defining points
    fn guide(&self, a: Point, b: Point) -> RendererData {
        let line = LineData::new(&self.style.guide_color, self.options().line.width, LineStyle::Dashed);
        RendererData::Segment(self.segment(a, b, line))
    }

    fn time_to_x(&self, timestamp: f64) -> Option<f64> {
        self.mapper.time_to_coordinate(timestamp.round() as i64)
    }

    fn price_to_y(&self, price: f64) -> Option<f64> {
        self.mapper.price_to_coordinate(price, self.base)
    }

    fn price_label(&self, price: f64) -> String {
        self.mapper.price_label(price, self.base)
    }

    /// Coefficient label of a Fibonacci level
    fn level_label(&self, value: String, color: &str, pivot: Point, alignment: BoxAlignment) -> RendererData {
        let font = FontOptions::sized(color, self.style.label_font_size);
        RendererData::Text(TextData::new(TextOptions::label(value, font, alignment), pivot))
    }

    /// User text label, editable by double click
    fn user_label(&self, text: TextOptions, pivot: Point) -> Option<TextData> {
        if text.value.is_empty() {
            return None;
        }
        Some(TextData { text, pivot, editable_label: true, hidden: self.label_hidden })
    }
}

/// Places a label on `bounds` according to its box alignment.
///
/// Padding is a third of the font size; the middle row also pads
/// horizontally and, with `clamp_middle`, never outgrows the box.
fn label_on_box(text: &TextOptions, bounds: Rect, clamp_middle: bool) -> (TextOptions, Point) {
    let third = text.font.size / 3.0;
    let alignment = text.text_box.alignment;
    let mut padding = Padding { x: 0.0, y: third };
    let y = match alignment.vertical {
        BoxVerticalAlignment::Top => bounds.y,
        BoxVerticalAlignment::Middle => {
            padding.x = third;
            bounds.center().y
        }
        BoxVerticalAlignment::Bottom => bounds.bottom(),
    };
    let x = match alignment.horizontal {
        BoxHorizontalAlignment::Left => bounds.x,
        BoxHorizontalAlignment::Center => bounds.center().x,
        BoxHorizontalAlignment::Right => bounds.right(),
    };
    let mut label = text.clone();
    label.text_box.padding = padding;
    if clamp_middle && alignment.vertical == BoxVerticalAlignment::Middle {
        label.text_box.max_height = Some(bounds.height);
    }
    (label, Point::new(x, y))
}

/// Degrees, counter-clockwise, of the segment `a`-`b`
fn segment_angle(a: Point, b: Point) -> f64 {
    let angle = ((b.y - a.y) / (b.x - a.x)).atan().to_degrees() * -1.0;
    if angle.is_finite() { angle } else { 0.0 }
}

/// Pivot along a segment for a label aligned left / centre / right
fn pivot_along(a: Point, b: Point, alignment: BoxHorizontalAlignment) -> Point {
    match alignment {
        BoxHorizontalAlignment::Left => a,
        BoxHorizontalAlignment::Center => a.lerp(b, 0.5),
        BoxHorizontalAlignment::Right => b,
    }
}

/// Whether any extension flag relevant to culling is set
pub fn is_extended(tool_type: LineToolType, options: &LineToolOptions) -> bool {
    match tool_type {
        LineToolType::Rectangle | LineToolType::PriceRange => options.shape.extend.any(),
        LineToolType::LongShortPosition => {
            options.long_short.entry_stop_loss_rectangle.extend.any()
                || options.long_short.entry_tp_rectangle.extend.any()
        }
        t if t.has_levels() => options.extend.any(),
        _ => options.line.extend.any(),
    }
}

/// Builds the renderers and anchors of one tool, `None` when a required
/// coordinate is unavailable.
pub fn build(ctx: &BuildContext) -> Option<Geometry> {
    let tool_type = ctx.tool.tool_type();
    if tool_type.has_levels() && ctx.screen.len() < 2 {
        let mut geometry = Geometry::default();
        geometry.anchors_from(ctx.screen);
        return Some(geometry);
    }
    match tool_type {
        LineToolType::TrendLine | LineToolType::Ray | LineToolType::Arrow | LineToolType::ExtendedLine => {
            lines::trend_line(ctx)
        }
        LineToolType::HorizontalRay => lines::horizontal_ray(ctx),
        LineToolType::HorizontalLine => lines::horizontal_line(ctx),
        LineToolType::VerticalLine => lines::vertical_line(ctx),
        LineToolType::ParallelChannel => lines::parallel_channel(ctx),
        LineToolType::Callout => lines::callout(ctx),
        LineToolType::Text => lines::text(ctx),
        LineToolType::Rectangle => shapes::rectangle(ctx, false),
        LineToolType::PriceRange => shapes::rectangle(ctx, true),
        LineToolType::Circle => shapes::circle(ctx),
        LineToolType::Triangle => shapes::triangle(ctx),
        LineToolType::LongShortPosition => long_short::build(ctx),
        LineToolType::FibRetracement => fib::retracement(ctx),
        LineToolType::TrendBasedFibExtension => fib::extension(ctx),
        LineToolType::FibChannel => fib::channel(ctx),
        LineToolType::FibTimeZone => fib::time_zone(ctx, false),
        LineToolType::TrendBasedFibTime => fib::time_zone(ctx, true),
        LineToolType::FibSpeedResistanceFan => fib::fan(ctx),
        LineToolType::FibSpeedResistanceArcs => fib::arcs(ctx),
        LineToolType::FibCircles => fib::circles(ctx),
        LineToolType::FibSpiral => fib::spiral(ctx),
        LineToolType::FibWedge => fib::wedge(ctx),
        LineToolType::Pitchfan => fib::pitchfan(ctx),
    }
}

/// Rewrites the domain points after anchor `index` moved to `point`.
///
/// Synthetic anchors (rectangle corners, channel offset handles) update
/// the components of the domain points they stand for.
pub fn apply_anchor_edit(tool: &mut LineTool, index: usize, point: DomainPoint) {
    let points = tool.committed_points().to_vec();
    match (tool.tool_type(), index) {
        (LineToolType::Rectangle | LineToolType::PriceRange, 2) if points.len() >= 2 => {
            tool.set_point(0, DomainPoint::new(point.timestamp, points[0].price));
            tool.set_point(1, DomainPoint::new(points[1].timestamp, point.price));
        }
        (LineToolType::Rectangle | LineToolType::PriceRange, 3) if points.len() >= 2 => {
            tool.set_point(1, DomainPoint::new(point.timestamp, points[1].price));
            tool.set_point(0, DomainPoint::new(points[0].timestamp, point.price));
        }
        (LineToolType::ParallelChannel, 3) => tool.set_point(2, point),
        _ => tool.set_point(index, point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_label_pads_both_axes() {
        let text = TextOptions::label("x".into(), FontOptions::sized("#000", 12.0), BoxAlignment::default());
        let (label, pivot) = label_on_box(&text, Rect::new(0.0, 0.0, 100.0, 50.0), true);
        assert_eq!(pivot, Point::new(50.0, 25.0));
        assert_eq!(label.text_box.padding, Padding { x: 4.0, y: 4.0 });
        assert_eq!(label.text_box.max_height, Some(50.0));
    }

    #[test]
    fn vertical_segment_reads_upwards() {
        assert_eq!(segment_angle(Point::new(0.0, 100.0), Point::new(0.0, 0.0)), 90.0);
        assert_eq!(segment_angle(Point::new(0.0, 0.0), Point::new(10.0, 0.0)), 0.0);
    }

    #[test]
    fn rectangle_corner_edit_moves_both_points() {
        let mut tool = LineTool::with_points(
            "r",
            LineToolType::Rectangle,
            LineToolOptions::default(),
            vec![DomainPoint::new(0, 10.0), DomainPoint::new(100, 20.0)],
        );
        apply_anchor_edit(&mut tool, 2, DomainPoint::new(5, 25.0));
        assert_eq!(tool.committed_points(), &[DomainPoint::new(5, 10.0), DomainPoint::new(100, 25.0)]);
    }
}
