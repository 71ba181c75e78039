use serde::Serialize;

use super::GeometricRenderer;
use crate::domain::geometry::{Point, Rect};
use crate::domain::line_tool::{
    BoxHorizontalAlignment, BoxVerticalAlignment, HitTestData, HitTestResult, HitTestType, LineStyle, TextOptions,
};
use crate::infrastructure::rendering::surface::Surface;

const CHAR_WIDTH_FACTOR: f64 = 0.6;
const LINE_HEIGHT_FACTOR: f64 = 1.2;
const BASELINE_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextData {
    pub text: TextOptions,
    pub pivot: Point,
    /// Hits on this label may open the text editor
    pub editable_label: bool,
    /// Set while the label is being edited in place
    pub hidden: bool,
}

impl TextData {
    pub fn new(text: TextOptions, pivot: Point) -> Self {
        Self { text, pivot, editable_label: false, hidden: false }
    }
}

/// Measured label box.
///
/// Glyph metrics are estimated from the font size so that layout stays
/// identical with and without a browser canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLayout {
    pub lines: Vec<String>,
    /// Unrotated box, padding included
    pub rect: Rect,
    pub pivot: Point,
    /// Canvas rotation in radians around `pivot`
    pub angle: f64,
    pub line_height: f64,
    pub text_width: f64,
}

impl TextLayout {
    pub fn measure(data: &TextData) -> Self {
        let options = &data.text;
        let size = options.font.size;
        let padding = options.text_box.padding;
        let lines: Vec<String> = options.value.split('\n').map(str::to_string).collect();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let line_height = size * LINE_HEIGHT_FACTOR;
        let text_width = longest as f64 * size * CHAR_WIDTH_FACTOR;
        let width = text_width + 2.0 * padding.x;
        let mut height = lines.len() as f64 * line_height + 2.0 * padding.y;
        if let Some(max_height) = options.text_box.max_height {
            height = height.min(max_height.max(0.0));
        }

        let alignment = options.text_box.alignment;
        let x = match alignment.horizontal {
            BoxHorizontalAlignment::Left => data.pivot.x,
            BoxHorizontalAlignment::Center => data.pivot.x - width / 2.0,
            BoxHorizontalAlignment::Right => data.pivot.x - width,
        };
        let y = match alignment.vertical {
            BoxVerticalAlignment::Top => data.pivot.y,
            BoxVerticalAlignment::Middle => data.pivot.y - height / 2.0,
            BoxVerticalAlignment::Bottom => data.pivot.y - height,
        };

        Self {
            lines,
            rect: Rect::new(x, y, width, height),
            pivot: data.pivot,
            angle: -options.text_box.angle.to_radians(),
            line_height,
            text_width,
        }
    }

    /// Maps a pane point into the label's unrotated frame
    fn unrotate(&self, point: Point) -> Point {
        if self.angle == 0.0 {
            return point;
        }
        let (sin, cos) = (-self.angle).sin_cos();
        let d = point - self.pivot;
        Point::new(self.pivot.x + d.x * cos - d.y * sin, self.pivot.y + d.x * sin + d.y * cos)
    }
}

/// Multi-line text box with optional background and border
#[derive(Debug, Default)]
pub struct TextRenderer {
    data: Option<TextData>,
    layout: Option<TextLayout>,
}

impl TextRenderer {
    pub fn set_data(&mut self, data: TextData) {
        self.layout = Some(TextLayout::measure(&data));
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&TextData> {
        self.data.as_ref()
    }

    pub fn layout(&self) -> Option<&TextLayout> {
        self.layout.as_ref()
    }

    /// Unrotated label box, used to position the text editor
    pub fn text_rect(&self) -> Option<Rect> {
        self.layout.as_ref().map(|l| l.rect)
    }

    fn is_blank(&self) -> bool {
        self.data.as_ref().is_none_or(|d| d.text.value.is_empty())
    }
}

impl GeometricRenderer for TextRenderer {
    fn draw(&self, surface: &mut dyn Surface, _pixel_ratio: f64) {
        let (Some(data), Some(layout)) = (&self.data, &self.layout) else {
            return;
        };
        if data.hidden || self.is_blank() {
            return;
        }
        let options = &data.text;
        let rect = layout.rect;

        surface.save();
        if layout.angle != 0.0 {
            surface.translate(layout.pivot.x, layout.pivot.y);
            surface.rotate(layout.angle);
            surface.translate(-layout.pivot.x, -layout.pivot.y);
        }
        if let Some(background) = &options.text_box.background {
            surface.set_fill_style(&background.color);
            surface.fill_rect(rect.x, rect.y, rect.width, rect.height);
        }
        if let Some(border) = options.text_box.border.as_ref().filter(|b| b.width > 0.0) {
            surface.set_stroke_style(&border.color);
            surface.set_line_width(border.width);
            surface.set_line_dash(&border.style.dash_pattern(border.width));
            surface.begin_path();
            surface.rect(rect.x, rect.y, rect.width, rect.height);
            surface.stroke();
            surface.set_line_dash(&LineStyle::Solid.dash_pattern(border.width));
        }

        let size = options.font.size;
        let padding = options.text_box.padding;
        surface.set_font(&options.font.css());
        surface.set_fill_style(&options.font.color);
        for (i, line) in layout.lines.iter().enumerate() {
            let top = rect.y + padding.y + i as f64 * layout.line_height;
            if top + layout.line_height > rect.bottom() + f64::EPSILON && i > 0 {
                break;
            }
            let line_width = line.chars().count() as f64 * size * CHAR_WIDTH_FACTOR;
            let slack = layout.text_width - line_width;
            let offset = match options.text_box.alignment.horizontal {
                BoxHorizontalAlignment::Left => 0.0,
                BoxHorizontalAlignment::Center => slack / 2.0,
                BoxHorizontalAlignment::Right => slack,
            };
            surface.fill_text(line, rect.x + padding.x + offset, top + size * BASELINE_FACTOR);
        }
        surface.restore();
    }

    fn hit_test(&self, point: Point) -> Option<HitTestResult> {
        let (data, layout) = (self.data.as_ref()?, self.layout.as_ref()?);
        if self.is_blank() {
            return None;
        }
        layout.rect.contains(layout.unrotate(point)).then(|| {
            HitTestResult::with_data(
                HitTestType::MovePoint,
                HitTestData { text_label: data.editable_label, ..Default::default() },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_tool::{BoxAlignment, FontOptions};
    use crate::infrastructure::rendering::surface::RecordingSurface;

    fn label(value: &str, alignment: BoxAlignment) -> TextData {
        TextData::new(
            TextOptions::label(value.to_string(), FontOptions::sized("#fff", 10.0), alignment),
            Point::new(100.0, 100.0),
        )
    }

    #[test]
    fn top_center_box_hangs_below_the_pivot() {
        let layout = TextLayout::measure(&label(
            "abcd",
            BoxAlignment::new(BoxVerticalAlignment::Top, BoxHorizontalAlignment::Center),
        ));
        assert_eq!(layout.rect, Rect::new(88.0, 100.0, 24.0, 12.0));
    }

    #[test]
    fn bottom_right_box_sits_above_and_left() {
        let layout = TextLayout::measure(&label(
            "ab\ncd",
            BoxAlignment::new(BoxVerticalAlignment::Bottom, BoxHorizontalAlignment::Right),
        ));
        assert_eq!(layout.rect, Rect::new(88.0, 76.0, 12.0, 24.0));
    }

    #[test]
    fn max_height_clamps_the_box() {
        let mut data = label("a\nb\nc", BoxAlignment::default());
        data.text.text_box.max_height = Some(10.0);
        assert_eq!(TextLayout::measure(&data).rect.height, 10.0);
    }

    #[test]
    fn rotated_label_is_hit_in_its_own_frame() {
        let mut data = label(
            "abcdefghij",
            BoxAlignment::new(BoxVerticalAlignment::Middle, BoxHorizontalAlignment::Left),
        );
        data.text.text_box.angle = 90.0;
        let mut renderer = TextRenderer::default();
        renderer.set_data(data);
        // Rotated a quarter turn counter-clockwise the box points up
        assert!(renderer.hit_test(Point::new(100.0, 50.0)).is_some());
        assert!(renderer.hit_test(Point::new(150.0, 100.0)).is_none());
    }

    #[test]
    fn hidden_label_draws_nothing_but_still_hits() {
        let mut data = label("abc", BoxAlignment::default());
        data.hidden = true;
        data.editable_label = true;
        let mut renderer = TextRenderer::default();
        renderer.set_data(data);
        let mut surface = RecordingSurface::new();
        renderer.draw(&mut surface, 1.0);
        assert!(surface.texts().is_empty());
        let hit = renderer.hit_test(Point::new(100.0, 100.0));
        assert_eq!(hit.map(|h| h.data.text_label), Some(true));
    }

    #[test]
    fn empty_text_is_inert() {
        let mut renderer = TextRenderer::default();
        renderer.set_data(label("", BoxAlignment::default()));
        assert!(renderer.hit_test(Point::new(100.0, 100.0)).is_none());
    }
}
