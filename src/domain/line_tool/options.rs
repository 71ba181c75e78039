use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::value_objects::LineToolType;

/// Gray used for Fibonacci guide lines
pub const GUIDE_LINE_COLOR: &str = "#787b86";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
    LargeDashed,
    SparseDotted,
}

impl LineStyle {
    /// Canvas dash pattern for a stroke of the given width
    pub fn dash_pattern(&self, width: f64) -> Vec<f64> {
        match self {
            LineStyle::Solid => Vec::new(),
            LineStyle::Dotted => vec![width, width],
            LineStyle::Dashed => vec![2.0 * width, 2.0 * width],
            LineStyle::LargeDashed => vec![6.0 * width, 6.0 * width],
            LineStyle::SparseDotted => vec![width, 4.0 * width],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnd {
    #[default]
    Normal,
    Arrow,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Extend {
    pub left: bool,
    pub right: bool,
}

impl Extend {
    pub const NONE: Extend = Extend { left: false, right: false };

    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineEnds {
    pub left: LineEnd,
    pub right: LineEnd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineOptions {
    pub color: String,
    pub width: f64,
    pub style: LineStyle,
    pub extend: Extend,
    pub end: LineEnds,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            color: "#2962ff".to_string(),
            width: 1.0,
            style: LineStyle::Solid,
            extend: Extend::NONE,
            end: LineEnds::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontOptions {
    pub color: String,
    pub size: f64,
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            color: "#2962ff".to_string(),
            size: 12.0,
            family: "-apple-system, BlinkMacSystemFont, 'Trebuchet MS', Roboto, Ubuntu, sans-serif".to_string(),
            bold: false,
            italic: false,
        }
    }
}

impl FontOptions {
    pub fn sized(color: &str, size: f64) -> Self {
        Self { color: color.to_string(), size, ..Default::default() }
    }

    /// CSS font shorthand
    pub fn css(&self) -> String {
        format!(
            "{}{}{}px {}",
            if self.italic { "italic " } else { "" },
            if self.bold { "bold " } else { "" },
            self.size,
            self.family
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoxVerticalAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoxHorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxAlignment {
    pub vertical: BoxVerticalAlignment,
    pub horizontal: BoxHorizontalAlignment,
}

impl BoxAlignment {
    pub fn new(vertical: BoxVerticalAlignment, horizontal: BoxHorizontalAlignment) -> Self {
        Self { vertical, horizontal }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillOptions {
    pub color: String,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self { color: "rgba(41, 98, 255, 0.2)".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderOptions {
    pub color: String,
    pub width: f64,
    pub style: LineStyle,
    pub radius: f64,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self { color: "#2962ff".to_string(), width: 1.0, style: LineStyle::Solid, radius: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBoxOptions {
    pub alignment: BoxAlignment,
    /// Rotation in degrees, counter-clockwise
    pub angle: f64,
    pub padding: Padding,
    pub max_height: Option<f64>,
    pub background: Option<FillOptions>,
    pub border: Option<BorderOptions>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub value: String,
    pub font: FontOptions,
    #[serde(rename = "box")]
    pub text_box: TextBoxOptions,
}

impl TextOptions {
    pub fn label(value: String, font: FontOptions, alignment: BoxAlignment) -> Self {
        Self {
            value,
            font,
            text_box: TextBoxOptions { alignment, ..Default::default() },
        }
    }
}

/// Fill and outline of closed shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeOptions {
    pub background: Option<FillOptions>,
    pub border: BorderOptions,
    pub extend: Extend,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            background: Some(FillOptions::default()),
            border: BorderOptions::default(),
            extend: Extend::NONE,
        }
    }
}

impl ShapeOptions {
    pub fn tinted(color: &str, fill: &str) -> Self {
        Self {
            background: Some(FillOptions { color: fill.to_string() }),
            border: BorderOptions { color: color.to_string(), ..Default::default() },
            extend: Extend::NONE,
        }
    }
}

/// One coefficient banded element of a Fibonacci tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Level {
    pub coeff: f64,
    pub color: String,
    pub opacity: f64,
    pub visible: bool,
    pub distance_from_coeff_enabled: bool,
    pub distance_from_coeff: f64,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            coeff: 0.0,
            color: GUIDE_LINE_COLOR.to_string(),
            opacity: 0.1,
            visible: true,
            distance_from_coeff_enabled: false,
            distance_from_coeff: 0.0,
        }
    }
}

impl Level {
    pub fn new(coeff: f64, color: &str) -> Self {
        Self { coeff, color: color.to_string(), ..Default::default() }
    }
}

fn levels(table: &[(f64, &str)]) -> Vec<Level> {
    table.iter().map(|(coeff, color)| Level::new(*coeff, color)).collect()
}

static RETRACEMENT_LEVELS: Lazy<Vec<Level>> = Lazy::new(|| {
    levels(&[
        (0.0, "#787b86"),
        (0.236, "#f23645"),
        (0.382, "#ff9800"),
        (0.5, "#4caf50"),
        (0.618, "#089981"),
        (0.786, "#00bcd4"),
        (1.0, "#787b86"),
        (1.618, "#2962ff"),
        (2.618, "#f23645"),
        (3.618, "#9c27b0"),
        (4.236, "#e91e63"),
    ])
});

static TIME_ZONE_LEVELS: Lazy<Vec<Level>> = Lazy::new(|| {
    levels(&[
        (0.0, "#787b86"),
        (1.0, "#2962ff"),
        (2.0, "#2962ff"),
        (3.0, "#2962ff"),
        (5.0, "#2962ff"),
        (8.0, "#2962ff"),
        (13.0, "#2962ff"),
        (21.0, "#2962ff"),
        (34.0, "#2962ff"),
        (55.0, "#2962ff"),
        (89.0, "#2962ff"),
    ])
});

static FAN_LEVELS: Lazy<Vec<Level>> = Lazy::new(|| {
    levels(&[
        (0.0, "#787b86"),
        (0.25, "#f23645"),
        (0.382, "#ff9800"),
        (0.5, "#4caf50"),
        (0.618, "#089981"),
        (0.75, "#00bcd4"),
        (1.0, "#787b86"),
    ])
});

static CIRCLE_LEVELS: Lazy<Vec<Level>> = Lazy::new(|| {
    levels(&[
        (0.236, "#f23645"),
        (0.382, "#ff9800"),
        (0.5, "#4caf50"),
        (0.618, "#089981"),
        (0.786, "#00bcd4"),
        (1.0, "#787b86"),
        (1.618, "#2962ff"),
    ])
});

/// Fill, outline and auto text of a long/short position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LongShortOptions {
    pub entry_stop_loss_rectangle: ShapeOptions,
    pub entry_tp_rectangle: ShapeOptions,
    pub entry_stop_loss_text: TextOptions,
    pub entry_tp_text: TextOptions,
    pub show_auto_text: bool,
}

impl Default for LongShortOptions {
    fn default() -> Self {
        Self {
            entry_stop_loss_rectangle: ShapeOptions::tinted("#f23645", "rgba(242, 54, 69, 0.2)"),
            entry_tp_rectangle: ShapeOptions::tinted("#089981", "rgba(8, 153, 129, 0.2)"),
            entry_stop_loss_text: TextOptions::default(),
            entry_tp_text: TextOptions::default(),
            show_auto_text: true,
        }
    }
}

/// Options of a single tool; sections that a tool type has no use for are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineToolOptions {
    pub visible: bool,
    pub editable: bool,
    pub locked: bool,
    pub line: LineOptions,
    pub text: TextOptions,
    pub shape: ShapeOptions,
    /// Extension of Fibonacci level lines
    pub extend: Extend,
    pub levels: Vec<Level>,
    pub long_short: LongShortOptions,
}

impl Default for LineToolOptions {
    fn default() -> Self {
        Self {
            visible: true,
            editable: true,
            locked: false,
            line: LineOptions::default(),
            text: TextOptions::default(),
            shape: ShapeOptions::default(),
            extend: Extend::NONE,
            levels: Vec::new(),
            long_short: LongShortOptions::default(),
        }
    }
}

impl LineToolOptions {
    /// Defaults tuned for a tool type
    pub fn for_type(tool_type: LineToolType) -> Self {
        let mut options = Self::default();
        match tool_type {
            LineToolType::Ray | LineToolType::HorizontalRay => options.line.extend.right = true,
            LineToolType::ExtendedLine | LineToolType::HorizontalLine => {
                options.line.extend = Extend { left: true, right: true };
            }
            LineToolType::Arrow => options.line.end.right = LineEnd::Arrow,
            LineToolType::Text => {
                options.text.value = "Text".to_string();
                options.text.font.size = 14.0;
            }
            LineToolType::Callout => {
                options.text.value = "Callout".to_string();
                options.text.text_box.background = Some(FillOptions::default());
                options.text.text_box.border = Some(BorderOptions::default());
            }
            LineToolType::FibRetracement
            | LineToolType::TrendBasedFibExtension
            | LineToolType::FibChannel
            | LineToolType::FibSpiral
            | LineToolType::FibWedge => options.levels = RETRACEMENT_LEVELS.clone(),
            LineToolType::FibTimeZone | LineToolType::TrendBasedFibTime => {
                options.levels = TIME_ZONE_LEVELS.clone();
            }
            LineToolType::FibSpeedResistanceFan | LineToolType::Pitchfan => options.levels = FAN_LEVELS.clone(),
            LineToolType::FibCircles | LineToolType::FibSpeedResistanceArcs => {
                options.levels = CIRCLE_LEVELS.clone();
            }
            _ => {}
        }
        options
    }

    pub fn visible_levels(&self) -> Vec<&Level> {
        self.levels.iter().filter(|level| level.visible).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let options: LineToolOptions =
            serde_json::from_str(r##"{"line":{"color":"#ff0000"},"text":{"box":{"angle":45}}}"##).unwrap();
        assert_eq!(options.line.color, "#ff0000");
        assert_eq!(options.line.width, 1.0);
        assert_eq!(options.text.text_box.angle, 45.0);
        assert!(options.editable);
    }

    #[test]
    fn fibonacci_types_get_levels() {
        assert_eq!(LineToolOptions::for_type(LineToolType::FibRetracement).levels.len(), 11);
        assert!(LineToolOptions::for_type(LineToolType::TrendLine).levels.is_empty());
    }

    #[test]
    fn dash_pattern_scales_with_width() {
        assert_eq!(LineStyle::Dashed.dash_pattern(2.0), vec![4.0, 4.0]);
        assert!(LineStyle::Solid.dash_pattern(2.0).is_empty());
    }
}
