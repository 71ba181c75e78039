use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::surface::Surface;

/// Canvas 2D implementation of [`Surface`]
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }
}

// Canvas calls only fail on non-finite input, which the renderers never
// produce, so their results are dropped.
impl Surface for CanvasSurface {
    fn save(&mut self) {
        self.context.save();
    }

    fn restore(&mut self) {
        self.context.restore();
    }

    fn scale(&mut self, x: f64, y: f64) {
        let _ = self.context.scale(x, y);
    }

    fn translate(&mut self, x: f64, y: f64) {
        let _ = self.context.translate(x, y);
    }

    fn rotate(&mut self, angle: f64) {
        let _ = self.context.rotate(angle);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.rect(x, y, width, height);
    }

    fn ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, start: f64, end: f64, anticlockwise: bool) {
        let _ = self
            .context
            .ellipse_with_anticlockwise(x, y, radius_x, radius_y, 0.0, start, end, anticlockwise);
    }

    fn fill(&mut self) {
        self.context.fill();
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.fill_rect(x, y, width, height);
    }

    #[allow(deprecated)]
    fn set_fill_style(&mut self, color: &str) {
        self.context.set_fill_style(&JsValue::from_str(color));
    }

    #[allow(deprecated)]
    fn set_stroke_style(&mut self, color: &str) {
        self.context.set_stroke_style(&JsValue::from_str(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        let segments = js_sys::Array::new();
        for value in pattern {
            segments.push(&JsValue::from_f64(*value));
        }
        let _ = self.context.set_line_dash(&segments);
    }

    fn set_font(&mut self, font: &str) {
        self.context.set_font(font);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let _ = self.context.fill_text(text, x, y);
    }
}
