use serde::{Deserialize, Serialize};

use crate::domain::line_tool::{FontOptions, GUIDE_LINE_COLOR};

/// Drawing constants shared by every view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    pub anchor_radius: f64,
    pub anchor_stroke_width: f64,
    pub anchor_hovered_stroke_width: f64,
    pub anchor_color: String,
    pub anchor_background: String,
    /// Pointer slack around straight strokes
    pub hit_tolerance: f64,
    /// Extra slack for curved strokes (arcs, spirals)
    pub curve_tolerance_bonus: f64,
    pub guide_color: String,
    pub label_font_size: f64,
    /// Font of the long/short auto text
    pub auto_text_font: FontOptions,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            anchor_radius: 6.0,
            anchor_stroke_width: 1.0,
            anchor_hovered_stroke_width: 4.0,
            anchor_color: "#1E53E5".to_string(),
            anchor_background: "#ffffff".to_string(),
            hit_tolerance: 3.0,
            curve_tolerance_bonus: 2.0,
            guide_color: GUIDE_LINE_COLOR.to_string(),
            label_font_size: 11.0,
            auto_text_font: FontOptions {
                family: "Arial".to_string(),
                ..FontOptions::sized("rgba(255, 255, 255, 1)", 14.0)
            },
        }
    }
}

impl StyleConfig {
    pub fn curve_tolerance(&self) -> f64 {
        self.hit_tolerance + self.curve_tolerance_bonus
    }
}
