use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Value Object - visible time window, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.from && timestamp <= self.to
    }
}

/// Value Object - Viewport
///
/// Linear time and price window over a pane of `width` x `height` CSS pixels.
/// Prices grow upwards, so the Y axis is inverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub start_time: f64,
    pub end_time: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub width: u32,
    pub height: u32,
    /// Decimal places kept by price formatting
    pub price_precision: u32,
    /// Baseline of the owning series, if it has data
    pub first_value: Option<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: 0.0,
            min_price: 0.0,
            max_price: 100.0,
            width: 800,
            height: 600,
            price_precision: 2,
            first_value: None,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Default::default() }
    }

    pub fn with_ranges(mut self, start_time: f64, end_time: f64, min_price: f64, max_price: f64) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self.min_price = min_price;
        self.max_price = max_price;
        self.first_value.get_or_insert(min_price);
        self
    }

    pub fn time_range(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn price_range(&self) -> f64 {
        self.max_price - self.min_price
    }

    /// Shift the window by a fraction of its span on each axis
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        let time_delta = self.time_range() * delta_x;
        self.start_time += time_delta;
        self.end_time += time_delta;

        let price_delta = self.price_range() * delta_y;
        self.min_price += price_delta;
        self.max_price += price_delta;
    }

    /// Convert a timestamp to a screen X coordinate
    pub fn time_to_x(&self, timestamp: f64) -> f64 {
        if self.time_range() == 0.0 {
            return 0.0;
        }
        let normalized = (timestamp - self.start_time) / self.time_range();
        normalized * self.width as f64
    }

    /// Convert a price to a screen Y coordinate
    pub fn price_to_y(&self, price: f64) -> f64 {
        if self.price_range() == 0.0 {
            return self.height as f64 / 2.0;
        }
        let normalized = (price - self.min_price) / self.price_range();
        self.height as f64 * (1.0 - normalized)
    }

    /// Convert a screen X coordinate back to time
    pub fn x_to_time(&self, x: f64) -> f64 {
        let normalized = x / self.width as f64;
        self.start_time + self.time_range() * normalized
    }

    /// Convert a screen Y coordinate back to price
    pub fn y_to_price(&self, y: f64) -> f64 {
        let normalized = 1.0 - (y / self.height as f64);
        self.min_price + self.price_range() * normalized
    }
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parses `#rgb`, `#rrggbb` and `#rrggbbaa`
    pub fn parse(css: &str) -> Option<Self> {
        let hex = css.trim().strip_prefix('#').filter(|h| h.is_ascii())?;
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_string(),
            _ => return None,
        };
        let value = u32::from_str_radix(&expanded[..6], 16).ok()?;
        let alpha = match expanded.get(6..8) {
            Some(a) => u8::from_str_radix(a, 16).ok()? as f32 / 255.0,
            None => 1.0,
        };
        Some(Self::from_hex(value).with_alpha(alpha))
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }

    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// CSS colour with its alpha replaced; unparsable input is passed through.
pub fn apply_alpha(css: &str, alpha: f64) -> String {
    match Color::parse(css) {
        Some(color) => color.with_alpha(alpha as f32).to_css(),
        None => css.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse("#2962ff").map(|c| c.to_css()), Some("rgba(41, 98, 255, 1)".to_string()));
        assert_eq!(Color::parse("rgba(1,2,3,1)"), None);
    }

    #[test]
    fn alpha_applies_to_hex_only() {
        assert_eq!(apply_alpha("#000000", 0.5), "rgba(0, 0, 0, 0.5)");
        assert_eq!(apply_alpha("red", 0.5), "red");
    }
}
