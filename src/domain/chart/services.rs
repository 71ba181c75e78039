use super::value_objects::{TimeRange, Viewport};

/// Conversion authority between domain points and pane coordinates.
///
/// Implemented by the host chart's price and time scales. Every forward
/// mapping may report `None` while the scales are not ready; callers skip
/// the frame instead of drawing degenerate geometry.
pub trait CoordinateMapper {
    /// Time scale has nothing to map against
    fn is_empty(&self) -> bool;
    fn is_price_scale_empty(&self) -> bool;

    /// Baseline of the owning series
    fn first_value(&self) -> Option<f64>;

    fn time_to_coordinate(&self, timestamp: i64) -> Option<f64>;
    fn coordinate_to_time(&self, x: f64) -> i64;
    fn price_to_coordinate(&self, price: f64, base: f64) -> Option<f64>;
    fn coordinate_to_price(&self, y: f64, base: f64) -> f64;

    /// Rounds a price to the scale's precision
    fn format_price(&self, price: f64, base: f64) -> f64;

    /// Human readable price, used by auto generated labels
    fn price_label(&self, price: f64, base: f64) -> String {
        format!("{}", self.format_price(price, base))
    }

    fn visible_time_range(&self) -> Option<TimeRange>;

    /// Pane width and height in CSS pixels
    fn pane_size(&self) -> (f64, f64);
}

impl CoordinateMapper for Viewport {
    fn is_empty(&self) -> bool {
        self.time_range() <= 0.0 || self.width == 0
    }

    fn is_price_scale_empty(&self) -> bool {
        self.price_range() <= 0.0 || self.height == 0 || self.first_value.is_none()
    }

    fn first_value(&self) -> Option<f64> {
        self.first_value
    }

    fn time_to_coordinate(&self, timestamp: i64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.time_to_x(timestamp as f64))
    }

    fn coordinate_to_time(&self, x: f64) -> i64 {
        self.x_to_time(x).round() as i64
    }

    fn price_to_coordinate(&self, price: f64, _base: f64) -> Option<f64> {
        if self.is_price_scale_empty() || !price.is_finite() {
            return None;
        }
        Some(self.price_to_y(price))
    }

    fn coordinate_to_price(&self, y: f64, _base: f64) -> f64 {
        self.y_to_price(y)
    }

    fn format_price(&self, price: f64, _base: f64) -> f64 {
        let factor = 10f64.powi(self.price_precision as i32);
        (price * factor).round() / factor
    }

    fn price_label(&self, price: f64, base: f64) -> String {
        format!("{:.*}", self.price_precision as usize, self.format_price(price, base))
    }

    fn visible_time_range(&self) -> Option<TimeRange> {
        if self.is_empty() {
            return None;
        }
        Some(TimeRange::new(self.start_time.floor() as i64, self.end_time.ceil() as i64))
    }

    fn pane_size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scales_report_unavailable() {
        let viewport = Viewport::new(800, 600);
        assert!(viewport.is_empty());
        assert_eq!(viewport.time_to_coordinate(10), None);
        assert_eq!(viewport.price_to_coordinate(10.0, 10.0), None);
    }

    #[test]
    fn price_label_keeps_precision() {
        let viewport = Viewport::new(800, 600).with_ranges(0.0, 100.0, 0.0, 100.0);
        assert_eq!(viewport.price_label(12.5, 0.0), "12.50");
        assert_eq!(viewport.format_price(12.345678, 0.0), 12.35);
    }
}
