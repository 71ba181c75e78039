//! Routes pointer and key input to the tool views and forwards edit
//! notifications.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::application::style::StyleConfig;
use crate::application::text_edit::{NoopTextEditor, TextEditChannel, TextEditMessage, TextEditor};
use crate::application::view::{Frame, LineToolView, PointerInput, ViewResponse};
use crate::domain::chart::CoordinateMapper;
use crate::domain::errors::{LineToolError, ToolResult};
use crate::domain::events::{EventDispatcher, LineToolEvent};
use crate::domain::line_tool::{CursorType, EditStage, LineTool, LineToolExport, LineToolOptions, LineToolType};
use crate::domain::logging::LogComponent;
use crate::infrastructure::rendering::surface::Surface;
use crate::{log_debug, log_info, log_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum PointerEventKind {
    MouseDown,
    MouseMove,
    PressedMouseMove,
    MouseUp,
    DoubleClick,
}

/// Owns every tool view, bottom to top
pub struct InteractionDispatcher {
    views: Vec<LineToolView>,
    /// Tool capturing the pointer while it is placed or edited
    active: Option<String>,
    /// Tool whose label is open in the editor
    editing_label: Option<String>,
    events: Box<dyn EventDispatcher>,
    editor: Box<dyn TextEditor>,
    edits: TextEditChannel,
    style: StyleConfig,
    magnet: bool,
    cursor: CursorType,
    next_id: u64,
}

impl InteractionDispatcher {
    pub fn new(events: Box<dyn EventDispatcher>) -> Self {
        Self {
            views: Vec::new(),
            active: None,
            editing_label: None,
            events,
            editor: Box::new(NoopTextEditor),
            edits: TextEditChannel::new(),
            style: StyleConfig::default(),
            magnet: false,
            cursor: CursorType::Default,
            next_id: 0,
        }
    }

    pub fn with_text_editor(mut self, editor: Box<dyn TextEditor>) -> Self {
        self.editor = editor;
        self
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
        self.invalidate_all();
    }

    pub fn magnet_enabled(&self) -> bool {
        self.magnet
    }

    pub fn cursor(&self) -> CursorType {
        self.cursor
    }

    pub fn views(&self) -> &[LineToolView] {
        &self.views
    }

    pub fn view(&self, id: &str) -> Option<&LineToolView> {
        self.views.iter().find(|v| v.tool().id() == id)
    }

    pub fn tool(&self, id: &str) -> Option<&LineTool> {
        self.view(id).map(LineToolView::tool)
    }

    fn position(&self, id: &str) -> ToolResult<usize> {
        self.views
            .iter()
            .position(|v| v.tool().id() == id)
            .ok_or_else(|| LineToolError::ToolNotFound(id.to_string()))
    }

    /// Starts placing a new tool; an unfinished one is discarded first.
    pub fn create_tool(&mut self, tool_type: LineToolType, options: LineToolOptions) -> String {
        if let Some(id) = self.active.take() {
            if self.tool(&id).is_some_and(|t| !t.finished()) {
                if let Err(err) = self.remove_tool(&id) {
                    log_warn!(LogComponent::Application("Dispatcher"), "dropping {} failed: {}", id, err);
                }
            }
        }
        self.next_id += 1;
        let id = format!("{}-{}", tool_type.as_ref(), self.next_id);
        log_debug!(LogComponent::Application("Dispatcher"), "creating {} as {}", tool_type, id);
        self.views.push(LineToolView::new(LineTool::new(id.clone(), tool_type, options)));
        self.active = Some(id.clone());
        id
    }

    /// Adds a tool restored with its points
    pub fn add_tool(&mut self, tool: LineTool) {
        self.views.push(LineToolView::new(tool));
    }

    pub fn remove_tool(&mut self, id: &str) -> ToolResult<()> {
        let index = self.position(id)?;
        self.views.remove(index);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        if self.editing_label.as_deref() == Some(id) {
            self.editing_label = None;
            self.editor.close();
        }
        self.events.publish_line_tool_event(LineToolEvent::ToolRemoved { id: id.to_string() });
        Ok(())
    }

    pub fn apply_options(&mut self, id: &str, options: LineToolOptions) -> ToolResult<()> {
        let index = self.position(id)?;
        self.views[index].tool_mut().apply_options(options);
        Ok(())
    }

    pub fn export(&self) -> Vec<LineToolExport> {
        self.views.iter().map(|v| v.tool().export()).collect()
    }

    /// Forces a rebuild of every view, e.g. after the scales moved
    pub fn invalidate_all(&mut self) {
        self.views.iter_mut().for_each(LineToolView::invalidate);
    }

    /// Visit order: the capturing tool, then top to bottom
    fn visit_order(&self) -> Vec<usize> {
        let active = self.active.as_deref().and_then(|id| self.views.iter().position(|v| v.tool().id() == id));
        active.into_iter().chain((0..self.views.len()).rev().filter(|i| Some(*i) != active)).collect()
    }

    /// Routes one pointer event; returns whether a redraw is needed
    pub fn handle_pointer(
        &mut self,
        kind: PointerEventKind,
        mapper: &dyn CoordinateMapper,
        pixel_ratio: f64,
        mut input: PointerInput,
    ) -> bool {
        let mut redraw = self.process_text_edits();
        let order = self.visit_order();
        let frame = Frame { mapper, style: &self.style, pixel_ratio };
        let mut responses = Vec::with_capacity(order.len());
        for index in order {
            let view = &mut self.views[index];
            view.update_if_needed(&frame);
            let response = match kind {
                PointerEventKind::MouseDown => view.mouse_down(&frame, &input),
                PointerEventKind::MouseMove => view.mouse_move(&frame, &input),
                PointerEventKind::PressedMouseMove => view.pressed_mouse_move(&frame, &input),
                PointerEventKind::MouseUp => view.mouse_up(&frame),
                PointerEventKind::DoubleClick => view.double_click(&frame, &input),
            };
            input.consumed |= view.holds_pointer() || response.hit;
            responses.push((index, response));
        }

        let mut cursor = None;
        for (index, response) in responses {
            redraw |= response.redraw;
            cursor = cursor.or(response.cursor);
            redraw |= self.apply_response(index, response, pixel_ratio);
        }
        self.cursor = cursor.unwrap_or_default();
        self.active = self.views.iter().find(|v| v.holds_pointer()).map(|v| v.tool().id().to_string());
        redraw
    }

    fn apply_response(&mut self, index: usize, response: ViewResponse, pixel_ratio: f64) -> bool {
        if let Some(magnet) = response.magnet {
            self.magnet = magnet;
        }
        if let Some(stage) = response.stage {
            self.publish(index, stage);
        }
        let Some(edit) = response.label_edit else {
            return false;
        };
        let id = self.views[index].tool().id().to_string();
        if let Some(previous) = self.editing_label.replace(id.clone()) {
            if previous != id {
                self.close_label_edit(&previous, None);
            }
        }
        let request = self.edits.request(&id, edit, pixel_ratio);
        self.editor.open(request);
        true
    }

    fn publish(&self, index: usize, stage: EditStage) {
        let snapshot = self.views[index].tool().export();
        log_info!(LogComponent::Application("Dispatcher"), "{} {}", snapshot.id, stage);
        self.events.publish_line_tool_event(LineToolEvent::AfterEdit { snapshot, stage });
    }

    fn close_label_edit(&mut self, id: &str, text: Option<String>) -> bool {
        let Ok(index) = self.position(id) else {
            return false;
        };
        let changed = self.views[index].finish_label_edit(text);
        if changed {
            self.publish(index, EditStage::LineToolEdited);
        }
        true
    }

    /// Applies editor outcomes; returns whether a label changed state
    pub fn process_text_edits(&mut self) -> bool {
        let mut any = false;
        for message in self.edits.drain() {
            let (id, text) = match message {
                TextEditMessage::Commit { tool_id, text } => (tool_id, Some(text)),
                TextEditMessage::Cancel { tool_id } => (tool_id, None),
            };
            if self.editing_label.as_deref() == Some(id.as_str()) {
                self.editing_label = None;
                self.editor.close();
            }
            any |= self.close_label_edit(&id, text);
        }
        any
    }

    /// Returns whether the key was handled
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key != "Escape" {
            return false;
        }
        let Some(id) = self.editing_label.take() else {
            return false;
        };
        self.editor.close();
        self.close_label_edit(&id, None)
    }

    /// Rebuilds stale views and draws them bottom to top
    pub fn render(&mut self, surface: &mut dyn Surface, mapper: &dyn CoordinateMapper, pixel_ratio: f64) {
        self.process_text_edits();
        let frame = Frame { mapper, style: &self.style, pixel_ratio };
        surface.save();
        surface.scale(pixel_ratio, pixel_ratio);
        for view in &mut self.views {
            view.update_if_needed(&frame);
            view.draw(surface, pixel_ratio);
        }
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::Viewport;
    use crate::domain::events::InMemoryEventDispatcher;
    use crate::domain::line_tool::DomainPoint;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording() -> (InteractionDispatcher, Rc<RefCell<Vec<LineToolEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let mut events = InMemoryEventDispatcher::new();
        events.subscribe_to_line_tool_events(move |e| sink.borrow_mut().push(e.clone()));
        (InteractionDispatcher::new(Box::new(events)), log)
    }

    fn viewport() -> Viewport {
        Viewport::new(800, 600).with_ranges(0.0, 800.0, 0.0, 600.0)
    }

    fn stages(log: &Rc<RefCell<Vec<LineToolEvent>>>) -> Vec<EditStage> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                LineToolEvent::AfterEdit { stage, .. } => Some(*stage),
                LineToolEvent::ToolRemoved { .. } => None,
            })
            .collect()
    }

    #[test]
    fn two_clicks_place_a_trend_line() {
        let (mut dispatcher, log) = recording();
        let vp = viewport();
        let id = dispatcher.create_tool(LineToolType::TrendLine, LineToolOptions::default());

        dispatcher.handle_pointer(PointerEventKind::MouseDown, &vp, 1.0, PointerInput::at(100.0, 300.0));
        dispatcher.handle_pointer(PointerEventKind::MouseMove, &vp, 1.0, PointerInput::at(200.0, 200.0));
        assert!(dispatcher.magnet_enabled());
        dispatcher.handle_pointer(PointerEventKind::MouseDown, &vp, 1.0, PointerInput::at(200.0, 200.0));
        dispatcher.handle_pointer(PointerEventKind::MouseUp, &vp, 1.0, PointerInput::at(200.0, 200.0));

        let tool = dispatcher.tool(&id).expect("tool");
        assert!(tool.finished());
        assert_eq!(tool.committed_points(), &[DomainPoint::new(100, 300.0), DomainPoint::new(200, 400.0)]);
        assert_eq!(stages(&log), vec![EditStage::LineToolFinished]);
    }

    #[test]
    fn starting_a_new_tool_drops_the_unfinished_one() {
        let (mut dispatcher, log) = recording();
        let first = dispatcher.create_tool(LineToolType::TrendLine, LineToolOptions::default());
        let second = dispatcher.create_tool(LineToolType::Rectangle, LineToolOptions::default());
        assert!(dispatcher.tool(&first).is_none());
        assert!(dispatcher.tool(&second).is_some());
        assert_eq!(log.borrow().as_slice(), &[LineToolEvent::ToolRemoved { id: first }]);
    }

    #[test]
    fn removing_an_unknown_tool_fails() {
        let (mut dispatcher, _) = recording();
        assert_eq!(dispatcher.remove_tool("nope"), Err(LineToolError::ToolNotFound("nope".into())));
    }

    #[test]
    fn escape_without_an_open_editor_is_ignored() {
        let (mut dispatcher, _) = recording();
        assert!(!dispatcher.handle_key("Escape"));
        assert!(!dispatcher.handle_key("Enter"));
    }

    #[test]
    fn pointer_kinds_parse_from_camel_case() {
        assert_eq!("pressedMouseMove".parse::<PointerEventKind>(), Ok(PointerEventKind::PressedMouseMove));
    }
}
