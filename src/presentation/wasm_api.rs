use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::application::text_edit::{TextEditHandle, TextEditRequest, TextEditor};
use crate::application::view::PointerInput;
use crate::application::{InteractionDispatcher, PointerEventKind, StyleConfig};
use crate::domain::chart::Viewport;
use crate::domain::errors::{LineToolError, ToolResult};
use crate::domain::events::InMemoryEventDispatcher;
use crate::domain::line_tool::{LineTool, LineToolExport, LineToolOptions, LineToolType};
use crate::domain::logging::LogComponent;
use crate::infrastructure::rendering::CanvasSurface;
use crate::log_warn;

use super::options_json::{event_json, patch_options};

fn to_js(err: LineToolError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

type Callback = Rc<RefCell<Option<js_sys::Function>>>;

fn call(callback: &Callback, payload: &str) {
    if let Some(function) = callback.borrow().as_ref() {
        if let Err(err) = function.call1(&JsValue::NULL, &JsValue::from_str(payload)) {
            log_warn!(LogComponent::Presentation("LineToolsApi"), "callback failed: {:?}", err);
        }
    }
}

/// Forwards edit requests to a page callback and keeps the handle for the
/// commit/cancel calls coming back.
struct JsTextEditor {
    callback: Callback,
    handle: Rc<RefCell<Option<TextEditHandle>>>,
}

impl TextEditor for JsTextEditor {
    fn open(&mut self, request: TextEditRequest) {
        let payload = serde_json::json!({
            "toolId": request.tool_id,
            "x": request.pivot_x(),
            "y": request.rect.y,
            "width": request.rect.width,
            "height": request.rect.height,
            "pixelRatio": request.pixel_ratio,
            "align": request.alignment,
            "text": request.text,
        });
        *self.handle.borrow_mut() = Some(request.handle);
        call(&self.callback, &payload.to_string());
    }

    fn close(&mut self) {
        self.handle.borrow_mut().take();
    }
}

/// Line tools overlay bound to one chart pane
#[wasm_bindgen]
pub struct LineToolsApi {
    dispatcher: InteractionDispatcher,
    viewport: Viewport,
    pixel_ratio: f64,
    after_edit: Callback,
    label_edit: Callback,
    edit_handle: Rc<RefCell<Option<TextEditHandle>>>,
}

#[wasm_bindgen]
impl LineToolsApi {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        let after_edit: Callback = Rc::default();
        let label_edit: Callback = Rc::default();
        let edit_handle = Rc::new(RefCell::new(None));

        let mut events = InMemoryEventDispatcher::new();
        let sink = after_edit.clone();
        events.subscribe_to_line_tool_events(move |event| call(&sink, &event_json(event).to_string()));
        let editor = JsTextEditor { callback: label_edit.clone(), handle: edit_handle.clone() };

        Self {
            dispatcher: InteractionDispatcher::new(Box::new(events)).with_text_editor(Box::new(editor)),
            viewport: Viewport::new(width, height),
            pixel_ratio,
            after_edit,
            label_edit,
            edit_handle,
        }
    }

    /// Visible time and price window; every tool rebuilds on the next render.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, start_time: f64, end_time: f64, min_price: f64, max_price: f64) {
        self.viewport = self.viewport.clone().with_ranges(start_time, end_time, min_price, max_price);
        self.dispatcher.invalidate_all();
    }

    #[wasm_bindgen(js_name = resize)]
    pub fn resize(&mut self, width: u32, height: u32, pixel_ratio: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.pixel_ratio = pixel_ratio;
        self.dispatcher.invalidate_all();
    }

    #[wasm_bindgen(js_name = setPricePrecision)]
    pub fn set_price_precision(&mut self, precision: u32) {
        self.viewport.price_precision = precision;
        self.dispatcher.invalidate_all();
    }

    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, json: &str) -> Result<(), JsValue> {
        let style: StyleConfig = serde_json::from_str(json).map_err(|e| to_js(e.into()))?;
        self.dispatcher.set_style(style);
        Ok(())
    }

    /// Starts placing a tool; `options` patches the type defaults.
    #[wasm_bindgen(js_name = createTool)]
    pub fn create_tool(&mut self, tool_type: &str, options: Option<String>) -> Result<String, JsValue> {
        self.try_create(tool_type, options.as_deref().unwrap_or_default()).map_err(to_js)
    }

    /// Restores a tool from its exported JSON
    #[wasm_bindgen(js_name = importTool)]
    pub fn import_tool(&mut self, json: &str) -> Result<String, JsValue> {
        let export: LineToolExport = serde_json::from_str(json).map_err(|e| to_js(e.into()))?;
        let id = export.id.clone();
        self.dispatcher.add_tool(LineTool::with_points(export.id, export.tool_type, export.options, export.points));
        Ok(id)
    }

    #[wasm_bindgen(js_name = setToolOptions)]
    pub fn set_tool_options(&mut self, id: &str, options: &str) -> Result<(), JsValue> {
        self.try_set_options(id, options).map_err(to_js)
    }

    #[wasm_bindgen(js_name = removeTool)]
    pub fn remove_tool(&mut self, id: &str) -> Result<(), JsValue> {
        self.dispatcher.remove_tool(id).map_err(to_js)
    }

    /// Routes a pointer event in CSS pixels; returns whether to redraw.
    #[wasm_bindgen(js_name = pointerEvent)]
    pub fn pointer_event(&mut self, kind: &str, x: f64, y: f64, shift: bool) -> Result<bool, JsValue> {
        let kind: PointerEventKind = kind.parse().map_err(|_| to_js(LineToolError::UnknownEvent(kind.to_string())))?;
        let mut input = PointerInput::at(x, y);
        input.shift = shift;
        Ok(self.dispatcher.handle_pointer(kind, &self.viewport, self.pixel_ratio, input))
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        self.dispatcher.handle_key(key)
    }

    /// CSS cursor keyword for the pane
    #[wasm_bindgen(getter)]
    pub fn cursor(&self) -> String {
        self.dispatcher.cursor().as_ref().to_string()
    }

    #[wasm_bindgen(getter, js_name = magnetEnabled)]
    pub fn magnet_enabled(&self) -> bool {
        self.dispatcher.magnet_enabled()
    }

    /// Draws every tool onto the pane's 2D context
    pub fn render(&mut self, context: CanvasRenderingContext2d) {
        let mut surface = CanvasSurface::new(context);
        self.dispatcher.render(&mut surface, &self.viewport, self.pixel_ratio);
    }

    #[wasm_bindgen(js_name = exportTools)]
    pub fn export_tools(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.dispatcher.export()).map_err(|e| to_js(e.into()))
    }

    /// `callback(json)` after a tool is placed, edited or removed
    #[wasm_bindgen(js_name = onAfterEdit)]
    pub fn on_after_edit(&mut self, callback: Option<js_sys::Function>) {
        *self.after_edit.borrow_mut() = callback;
    }

    /// `callback(json)` when a label should be edited in place
    #[wasm_bindgen(js_name = onLabelEdit)]
    pub fn on_label_edit(&mut self, callback: Option<js_sys::Function>) {
        *self.label_edit.borrow_mut() = callback;
    }

    #[wasm_bindgen(js_name = commitLabel)]
    pub fn commit_label(&mut self, text: String) -> bool {
        let handle = self.edit_handle.borrow().clone();
        handle.map(|h| h.commit(text)).is_some() && self.dispatcher.process_text_edits()
    }

    #[wasm_bindgen(js_name = cancelLabel)]
    pub fn cancel_label(&mut self) -> bool {
        let handle = self.edit_handle.borrow().clone();
        handle.map(|h| h.cancel()).is_some() && self.dispatcher.process_text_edits()
    }
}

impl LineToolsApi {
    fn try_create(&mut self, tool_type: &str, options: &str) -> ToolResult<String> {
        let tool_type: LineToolType =
            tool_type.parse().map_err(|_| LineToolError::UnknownToolType(tool_type.to_string()))?;
        let options = patch_options(&LineToolOptions::for_type(tool_type), options)?;
        Ok(self.dispatcher.create_tool(tool_type, options))
    }

    fn try_set_options(&mut self, id: &str, patch: &str) -> ToolResult<()> {
        let current = self.dispatcher.tool(id).ok_or_else(|| LineToolError::ToolNotFound(id.to_string()))?;
        let options = patch_options(current.options(), patch)?;
        self.dispatcher.apply_options(id, options)
    }
}
