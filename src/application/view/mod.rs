//! One view per line tool: caches the projected anchors, rebuilds the
//! composite renderer and reacts to pointer input.

pub mod constraints;
pub mod culling;
pub mod families;

use crate::application::style::StyleConfig;
use crate::domain::chart::CoordinateMapper;
use crate::domain::geometry::{AnchorPoint, Point, Rect};
use crate::domain::line_tool::long_short::{is_long, take_profit_price};
use crate::domain::line_tool::{
    BoxHorizontalAlignment, ConstraintFamily, CursorType, DomainPoint, EditStage, HitTestResult, LineTool,
    LineToolType, TextOptions,
};
use crate::domain::logging::LogComponent;
use crate::infrastructure::rendering::renderers::{
    AnchorData, CompositeRenderer, GeometricRenderer, LineAnchorRenderer, RendererArena, RendererData,
};
use crate::infrastructure::rendering::surface::Surface;
use crate::{log_debug, log_trace};

use constraints::{DragMode, constrain};
use culling::CullPolicy;
use families::{BuildContext, apply_anchor_edit, build, is_extended};

/// Pane coordinates of `points`, or `None` if any of them cannot be mapped
fn project(mapper: &dyn CoordinateMapper, base: f64, points: &[DomainPoint]) -> Option<Vec<Point>> {
    points
        .iter()
        .map(|p| Some(Point::new(mapper.time_to_coordinate(p.timestamp)?, mapper.price_to_coordinate(p.price, base)?)))
        .collect()
}

/// Chart state a view needs for one pass
pub struct Frame<'a> {
    pub mapper: &'a dyn CoordinateMapper,
    pub style: &'a StyleConfig,
    pub pixel_ratio: f64,
}

/// Pointer position as delivered to a view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Raw pointer position in CSS pixels
    pub local: Point,
    /// Position after magnet snapping
    pub applied: Point,
    /// Axis-lock modifier held
    pub shift: bool,
    /// A tool above already handled the event
    pub consumed: bool,
}

impl PointerInput {
    pub fn at(x: f64, y: f64) -> Self {
        let point = Point::new(x, y);
        Self { local: point, applied: point, shift: false, consumed: false }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Label geometry handed to the text editor on double click
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEdit {
    pub rect: Rect,
    pub alignment: BoxHorizontalAlignment,
    pub text: TextOptions,
}

/// What a handler did, folded by the dispatcher
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewResponse {
    pub redraw: bool,
    pub hit: bool,
    pub stage: Option<EditStage>,
    pub cursor: Option<CursorType>,
    /// Magnet enable/disable request
    pub magnet: Option<bool>,
    pub label_edit: Option<LabelEdit>,
}

/// Transient drag bookkeeping, reset on mouse up
#[derive(Debug, Default)]
struct DragState {
    last_move_point: Option<Point>,
    edited_point_index: Option<usize>,
    /// Anchors captured on the last mouse down
    initial: Vec<Point>,
    is_flipped: bool,
}

pub struct LineToolView {
    tool: LineTool,
    /// Projection of `tool.points()`
    screen: Vec<Point>,
    anchors: Vec<AnchorPoint>,
    invalidated: bool,
    arena: RendererArena,
    composite: Option<CompositeRenderer>,
    anchor_renderer: LineAnchorRenderer,
    /// Text slot of the editable label
    label_slot: Option<usize>,
    label_hidden: bool,
    current_point: Option<Point>,
    drag: DragState,
}

impl LineToolView {
    pub fn new(tool: LineTool) -> Self {
        Self {
            tool,
            screen: Vec::new(),
            anchors: Vec::new(),
            invalidated: true,
            arena: RendererArena::new(),
            composite: None,
            anchor_renderer: LineAnchorRenderer::default(),
            label_slot: None,
            label_hidden: false,
            current_point: None,
            drag: DragState::default(),
        }
    }

    pub fn tool(&self) -> &LineTool {
        &self.tool
    }

    /// Mutable access; the view rebuilds on the next pass
    pub fn tool_mut(&mut self) -> &mut LineTool {
        self.invalidated = true;
        &mut self.tool
    }

    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    pub fn composite(&self) -> Option<&CompositeRenderer> {
        self.composite.as_ref()
    }

    pub fn anchors(&self) -> &[AnchorPoint] {
        &self.anchors
    }

    pub fn is_flipped(&self) -> bool {
        self.drag.is_flipped
    }

    pub fn edited_point_index(&self) -> Option<usize> {
        self.drag.edited_point_index
    }

    pub fn anchor_data(&self) -> Option<&AnchorData> {
        self.anchor_renderer.data()
    }

    /// Renderer data of the current frame, in draw order
    pub fn renderer_data(&self) -> Vec<RendererData> {
        self.composite.as_ref().map(|c| c.data(&self.arena)).unwrap_or_default()
    }

    /// Whether the view keeps the event from tools below it
    pub fn holds_pointer(&self) -> bool {
        self.tool.editing() || !self.tool.finished()
    }

    pub fn update_if_needed(&mut self, frame: &Frame) {
        if self.invalidated {
            self.update(frame);
        }
    }

    /// Re-projects the points and rebuilds the composite renderer.
    ///
    /// Leaves no composite when the tool is hidden, culled or a coordinate
    /// cannot be mapped.
    pub fn update(&mut self, frame: &Frame) {
        self.invalidated = false;
        self.composite = None;
        self.anchors.clear();
        self.label_slot = None;
        if !self.tool.visible() {
            return;
        }
        let mapper = frame.mapper;
        if mapper.is_empty() || mapper.is_price_scale_empty() {
            return;
        }
        let Some(base) = mapper.first_value() else {
            return;
        };
        let points = self.tool.points();
        let tool_type = self.tool.tool_type();
        let extended = is_extended(tool_type, self.tool.options());
        let policy = CullPolicy::for_type(tool_type);
        if policy.culled_in_time(&points, mapper.visible_time_range(), extended) {
            log_trace!(LogComponent::Application("LineToolView"), "{} outside the time range", self.tool.id());
            return;
        }

        let Some(screen) = project(mapper, base, &points) else {
            return;
        };
        self.screen = screen;

        let (width, height) = mapper.pane_size();
        if policy.culled_on_price(&self.screen, height, extended) {
            log_trace!(LogComponent::Application("LineToolView"), "{} outside the price range", self.tool.id());
            return;
        }

        let ctx = BuildContext {
            tool: &self.tool,
            points: &points,
            screen: &self.screen,
            mapper,
            base,
            style: frame.style,
            width,
            height,
            pixel_ratio: frame.pixel_ratio,
            label_hidden: self.label_hidden,
        };
        let Some(geometry) = build(&ctx) else {
            return;
        };
        let composite = self.arena.compose(geometry.renderers);
        self.label_slot = geometry.label.and_then(|i| composite.items().get(i)).map(|item| item.slot);
        self.composite = Some(composite);
        self.anchors = geometry.anchors;

        let style = frame.style;
        self.anchor_renderer.set_data(AnchorData {
            points: self.anchors.clone(),
            cursors: geometry.cursors,
            radius: style.anchor_radius,
            stroke_width: style.anchor_stroke_width,
            hovered_stroke_width: style.anchor_hovered_stroke_width,
            color: style.anchor_color.clone(),
            background: style.anchor_background.clone(),
            visible: false,
            selected: false,
            current_point: None,
            edited_point_index: None,
        });
        self.refresh_anchors();
    }

    fn anchors_visible(&self) -> bool {
        let tool = &self.tool;
        tool.hovered() || tool.selected() || tool.editing() || tool.creating()
    }

    fn refresh_anchors(&mut self) {
        let visible = self.anchors_visible();
        let selected = self.tool.selected();
        let edited = self.drag.edited_point_index.filter(|_| self.tool.editing());
        self.anchor_renderer.update_state(visible, selected, self.current_point, edited);
    }

    /// Anchors first, then the composite in draw order
    pub fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        if !self.tool.visible() {
            return None;
        }
        let composite = self.composite.as_ref()?;
        self.anchor_renderer.hit_test(point).or_else(|| composite.hit_test(&self.arena, point))
    }

    pub fn draw(&self, surface: &mut dyn Surface, pixel_ratio: f64) {
        let Some(composite) = &self.composite else {
            return;
        };
        composite.draw(&self.arena, surface, pixel_ratio);
        self.anchor_renderer.draw(surface, pixel_ratio);
    }

    /// Inverse mapping with the price rounded by the scale
    fn to_domain(&self, frame: &Frame, point: Point) -> Option<DomainPoint> {
        let mapper = frame.mapper;
        let base = mapper.first_value()?;
        let price = mapper.format_price(mapper.coordinate_to_price(point.y, base), base);
        (point.is_finite() && price.is_finite()).then(|| DomainPoint::new(mapper.coordinate_to_time(point.x), price))
    }

    fn family(&self) -> ConstraintFamily {
        self.tool.tool_type().constraint_family()
    }

    fn is_long_short(&self) -> bool {
        self.tool.tool_type() == LineToolType::LongShortPosition
    }

    fn creation_point(&self, input: &PointerInput) -> Point {
        if input.shift {
            constrain(self.family(), DragMode::Creating, input.applied, &self.screen, &self.drag.initial)
        } else {
            input.applied
        }
    }

    pub fn mouse_down(&mut self, frame: &Frame, input: &PointerInput) -> ViewResponse {
        let mut response = ViewResponse::default();
        if !self.tool.visible() {
            return response;
        }
        self.drag.initial = self.anchors.iter().map(|a| a.point()).collect();

        if self.is_long_short() && self.tool.finished() && self.tool.long_short().click_count == 2 {
            if let [entry, stop, _] = self.tool.committed_points() {
                let long = is_long(entry.price, stop.price);
                self.tool.long_short_mut().is_long = long;
            }
        }

        if !self.tool.finished() {
            let pointer = if self.is_long_short() { input.applied } else { self.creation_point(input) };
            let Some(point) = self.to_domain(frame, pointer) else {
                return response;
            };
            if self.is_long_short() {
                self.drag.is_flipped = false;
                if self.tool.long_short().click_count < 2 {
                    self.tool.long_short_mut().click_count += 1;
                    self.tool.add_point(point);
                    if self.tool.long_short().click_count == 2 && self.complete_long_short(frame) {
                        response.stage = Some(EditStage::LineToolFinished);
                        response.magnet = Some(false);
                    }
                }
            } else {
                self.tool.add_point(point);
            }
            response.hit = true;
            response.redraw = true;
        } else if self.tool.editable() && !input.consumed {
            let hit = self.hit_test(input.local);
            response.hit = hit.is_some();
            response.redraw = self.tool.set_selected(hit.is_some());
        }
        self.update(frame);
        response
    }

    /// Appends the derived take-profit point and finishes the tool
    fn complete_long_short(&mut self, frame: &Frame) -> bool {
        let Some(base) = frame.mapper.first_value() else {
            return false;
        };
        let (entry, stop) = match self.tool.committed_points() {
            [entry, stop] => (*entry, *stop),
            _ => return false,
        };
        let target = frame.mapper.format_price(take_profit_price(entry.price, stop.price), base);
        self.tool.add_point(DomainPoint::new(stop.timestamp, target));
        self.tool.long_short_mut().is_long = is_long(entry.price, stop.price);
        let finished = self.tool.try_finish();
        if finished {
            log_debug!(
                LogComponent::Application("LineToolView"),
                "{} placed {}",
                self.tool.id(),
                if self.tool.long_short().is_long { "long" } else { "short" }
            );
        }
        finished
    }

    pub fn mouse_move(&mut self, frame: &Frame, input: &PointerInput) -> ViewResponse {
        let mut response = ViewResponse::default();
        if !self.tool.visible() {
            return response;
        }
        self.current_point = Some(input.local);

        if !self.tool.finished() {
            response.magnet = Some(true);
            response.hit = true;
            response.redraw = true;
            if self.is_long_short() {
                if self.tool.long_short().click_count == 1 {
                    let preview = self.to_domain(frame, input.applied);
                    self.tool.set_last_point(preview);
                }
            } else {
                let preview = self.to_domain(frame, self.creation_point(input));
                self.tool.set_last_point(preview);
            }
            self.update(frame);
            return response;
        }

        let hit = if input.consumed { None } else { self.hit_test(input.local) };
        response.redraw = self.tool.set_hovered(hit.is_some());
        response.hit = hit.is_some();
        if let Some(hit) = hit {
            response.cursor = Some(if self.tool.locked() {
                CursorType::NotAllowed
            } else if self.tool.editable() {
                self.drag.edited_point_index = hit.point_index();
                hit.cursor().unwrap_or(CursorType::Pointer)
            } else {
                hit.cursor().unwrap_or(CursorType::NotAllowed)
            });
        }
        self.refresh_anchors();
        response
    }

    pub fn pressed_mouse_move(&mut self, frame: &Frame, input: &PointerInput) -> ViewResponse {
        let mut response = ViewResponse::default();
        if input.consumed || !self.tool.selected() || self.tool.locked() {
            return response;
        }
        self.current_point = Some(input.local);

        let Some(last) = self.drag.last_move_point else {
            let hit = self.hit_test(input.local);
            self.tool.set_editing(self.tool.hovered() || hit.is_some());
            self.drag.last_move_point = Some(input.applied);
            if let Some(hit) = &hit {
                self.drag.edited_point_index = hit.point_index().or(self.drag.edited_point_index);
                response.magnet = Some(true);
            }
            response.hit = self.tool.editing();
            response.redraw = self.tool.editing();
            self.refresh_anchors();
            return response;
        };
        if !self.tool.editing() {
            return response;
        }

        match self.drag.edited_point_index {
            Some(index) => {
                response.cursor = Some(CursorType::Default);
                let pointer = if input.shift {
                    let anchors: Vec<Point> = self.anchors.iter().map(|a| a.point()).collect();
                    constrain(self.family(), DragMode::PointEdit(index), input.applied, &anchors, &self.drag.initial)
                } else {
                    input.applied
                };
                if self.is_long_short() {
                    self.drag_long_short(frame, index, pointer);
                } else if let Some(point) = self.to_domain(frame, pointer) {
                    apply_anchor_edit(&mut self.tool, index, point);
                }
            }
            None => {
                response.cursor = Some(CursorType::Grabbing);
                let delta = input.applied - last;
                let current = frame.mapper.first_value().and_then(|base| project(frame.mapper, base, &self.tool.points()));
                let moved: Option<Vec<DomainPoint>> = current
                    .and_then(|screen| screen.iter().map(|p| self.to_domain(frame, *p + delta)).collect());
                if let Some(points) = moved {
                    self.tool.set_points(points);
                }
            }
        }
        self.drag.last_move_point = Some(input.applied);
        response.hit = true;
        response.redraw = true;
        self.update(frame);
        response
    }

    /// Entry and stop re-derive direction and take profit; take profit
    /// moves on the price axis only.
    fn drag_long_short(&mut self, frame: &Frame, index: usize, pointer: Point) {
        let Some(point) = self.to_domain(frame, pointer) else {
            return;
        };
        let Some(base) = frame.mapper.first_value() else {
            return;
        };
        let (entry, stop) = match self.tool.committed_points() {
            [entry, stop, _] => (*entry, *stop),
            _ => return,
        };
        match index {
            0 | 1 => {
                let (entry, stop) = if index == 0 { (point, stop) } else { (entry, point) };
                if self.tool.long_short_mut().update_direction(entry.price, stop.price) {
                    self.drag.is_flipped = true;
                    log_debug!(LogComponent::Application("LineToolView"), "{} flipped direction", self.tool.id());
                }
                self.tool.set_point(index, point);
                let target = frame.mapper.format_price(take_profit_price(entry.price, stop.price), base);
                self.tool.set_point(2, DomainPoint::new(stop.timestamp, target));
            }
            _ => self.tool.set_point(2, DomainPoint::new(stop.timestamp, point.price)),
        }
    }

    pub fn mouse_up(&mut self, frame: &Frame) -> ViewResponse {
        let mut response = ViewResponse::default();
        if self.is_long_short() {
            self.drag.is_flipped = false;
        }
        if !self.tool.finished() {
            if !self.is_long_short() && self.tool.try_finish() {
                response.magnet = Some(false);
                response.stage = Some(EditStage::LineToolFinished);
                response.redraw = true;
            }
        } else if self.tool.editing() {
            response.magnet = Some(false);
            self.drag.last_move_point = None;
            self.drag.edited_point_index = None;
            self.tool.set_editing(false);
            self.tool.set_creating(false);
            response.stage = Some(EditStage::LineToolEdited);
            response.redraw = true;
            log_debug!(LogComponent::Application("LineToolView"), "{} edit committed", self.tool.id());
        }
        self.drag.last_move_point = None;
        self.update(frame);
        response
    }

    /// Opens the in-place editor when the editable label is under the pointer
    pub fn double_click(&mut self, frame: &Frame, input: &PointerInput) -> ViewResponse {
        let mut response = ViewResponse::default();
        if !self.tool.editable() || self.tool.options().text.value.is_empty() {
            return response;
        }
        let Some(label) = self.label_slot.and_then(|slot| self.arena.text(slot)) else {
            return response;
        };
        if label.hit_test(input.local).is_none() {
            return response;
        }
        let Some(rect) = label.text_rect() else {
            return response;
        };
        let text = self.tool.options().text.clone();
        self.tool.set_editing(true);
        self.label_hidden = true;
        self.update(frame);
        response.hit = true;
        response.redraw = true;
        response.label_edit = Some(LabelEdit { rect, alignment: text.text_box.alignment.horizontal, text });
        response
    }

    /// Closes an open label edit; `Some(text)` commits. Returns whether the
    /// text changed.
    pub fn finish_label_edit(&mut self, text: Option<String>) -> bool {
        self.tool.set_editing(false);
        self.label_hidden = false;
        self.invalidated = true;
        match text {
            Some(text) if text != self.tool.options().text.value => {
                self.tool.set_text(text);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::Viewport;
    use crate::domain::line_tool::LineToolOptions;

    fn viewport() -> Viewport {
        Viewport::new(800, 600).with_ranges(0.0, 800.0, 0.0, 600.0)
    }

    fn trend(points: [(i64, f64); 2]) -> LineToolView {
        let points = points.iter().map(|(t, p)| DomainPoint::new(*t, *p)).collect();
        LineToolView::new(LineTool::with_points("t", LineToolType::TrendLine, LineToolOptions::default(), points))
    }

    #[test]
    fn consumed_drag_leaves_a_selected_tool_alone() {
        let viewport = viewport();
        let style = StyleConfig::default();
        let frame = Frame { mapper: &viewport, style: &style, pixel_ratio: 1.0 };
        let mut view = trend([(100, 300.0), (300, 300.0)]);
        view.update(&frame);
        view.mouse_down(&frame, &PointerInput::at(200.0, 300.0));
        assert!(view.tool().selected());

        let mut input = PointerInput::at(200.0, 300.0);
        input.consumed = true;
        assert_eq!(view.pressed_mouse_move(&frame, &input), ViewResponse::default());
        input.local = Point::new(250.0, 300.0);
        input.applied = input.local;
        view.pressed_mouse_move(&frame, &input);
        assert!(!view.tool().editing());
        assert_eq!(view.tool().committed_points()[0], DomainPoint::new(100, 300.0));
    }

    #[test]
    fn finishing_placement_turns_the_magnet_off() {
        let viewport = viewport();
        let style = StyleConfig::default();
        let frame = Frame { mapper: &viewport, style: &style, pixel_ratio: 1.0 };
        let mut view = LineToolView::new(LineTool::new("t", LineToolType::TrendLine, LineToolOptions::default()));
        view.update(&frame);
        view.mouse_down(&frame, &PointerInput::at(100.0, 300.0));
        assert_eq!(view.mouse_move(&frame, &PointerInput::at(200.0, 200.0)).magnet, Some(true));
        view.mouse_down(&frame, &PointerInput::at(200.0, 200.0));
        let response = view.mouse_up(&frame);
        assert_eq!(response.stage, Some(EditStage::LineToolFinished));
        assert_eq!(response.magnet, Some(false));
    }

    #[test]
    fn hovered_anchor_is_not_marked_edited_before_the_drag() {
        let viewport = viewport();
        let style = StyleConfig::default();
        let frame = Frame { mapper: &viewport, style: &style, pixel_ratio: 1.0 };
        let mut view = trend([(100, 300.0), (300, 300.0)]);
        view.update(&frame);
        view.mouse_down(&frame, &PointerInput::at(200.0, 300.0));
        view.mouse_up(&frame);

        view.mouse_move(&frame, &PointerInput::at(100.0, 300.0));
        assert_eq!(view.edited_point_index(), Some(0));
        assert_eq!(view.anchor_data().and_then(|d| d.edited_point_index), None);

        view.pressed_mouse_move(&frame, &PointerInput::at(100.0, 300.0));
        assert!(view.tool().editing());
        assert_eq!(view.anchor_data().and_then(|d| d.edited_point_index), Some(0));
    }

    #[test]
    fn whole_drag_moves_every_point() {
        let viewport = viewport();
        let style = StyleConfig::default();
        let frame = Frame { mapper: &viewport, style: &style, pixel_ratio: 1.0 };
        let tool = LineTool::with_points(
            "t",
            LineToolType::TrendLine,
            LineToolOptions::default(),
            vec![DomainPoint::new(100, 300.0), DomainPoint::new(300, 300.0)],
        );
        let mut view = LineToolView::new(tool);
        view.update(&frame);
        view.mouse_down(&frame, &PointerInput::at(200.0, 300.0));
        assert!(view.tool().selected());
        view.pressed_mouse_move(&frame, &PointerInput::at(200.0, 300.0));
        view.pressed_mouse_move(&frame, &PointerInput::at(250.0, 300.0));
        let response = view.mouse_up(&frame);
        assert_eq!(response.stage, Some(EditStage::LineToolEdited));
        assert_eq!(view.tool().committed_points()[0].timestamp, 150);
        assert_eq!(view.tool().committed_points()[1].timestamp, 350);
    }
}
