/// Canvas-like drawing target used by every renderer.
///
/// Coordinates are CSS pixels; the composite applies the device pixel
/// ratio once with `scale` before handing the surface to a renderer.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn scale(&mut self, x: f64, y: f64);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, start: f64, end: f64, anticlockwise: bool);

    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_dash(&mut self, pattern: &[f64]);
    fn set_font(&mut self, font: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        self.ellipse(x, y, radius, radius, start, end, anticlockwise);
    }
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Scale(f64, f64),
    Translate(f64, f64),
    Rotate(f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
    Rect(f64, f64, f64, f64),
    Ellipse { x: f64, y: f64, radius_x: f64, radius_y: f64, start: f64, end: f64, anticlockwise: bool },
    Fill,
    Stroke,
    FillRect(f64, f64, f64, f64),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    LineDash(Vec<f64>),
    Font(String),
    FillText(String, f64, f64),
}

/// Surface that only records calls, for headless rendering checks
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Scale(x, y));
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Rect(x, y, width, height));
    }

    fn ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, start: f64, end: f64, anticlockwise: bool) {
        self.commands.push(DrawCommand::Ellipse { x, y, radius_x, radius_y, start, end, anticlockwise });
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect(x, y, width, height));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::FillStyle(color.to_string()));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeStyle(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.commands.push(DrawCommand::LineDash(pattern.to_vec()));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_string()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText(text.to_string(), x, y));
    }
}
