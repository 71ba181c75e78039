//! Cheap off-screen checks run before a view rebuilds its renderers.

use crate::domain::chart::TimeRange;
use crate::domain::geometry::Point;
use crate::domain::line_tool::{DomainPoint, LineToolType};

/// How one axis participates in culling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisCull {
    Never,
    Always,
    /// Only while no extension flag is set
    UnlessExtended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CullPolicy {
    pub vertical: AxisCull,
    pub horizontal: AxisCull,
}

impl CullPolicy {
    const fn new(vertical: AxisCull, horizontal: AxisCull) -> Self {
        Self { vertical, horizontal }
    }

    pub fn for_type(tool_type: LineToolType) -> Self {
        use AxisCull::*;
        match tool_type {
            LineToolType::TrendLine
            | LineToolType::Ray
            | LineToolType::Arrow
            | LineToolType::ExtendedLine
            | LineToolType::ParallelChannel
            | LineToolType::Callout
            | LineToolType::Rectangle
            | LineToolType::PriceRange
            | LineToolType::LongShortPosition => Self::new(UnlessExtended, UnlessExtended),
            LineToolType::HorizontalRay => Self::new(Always, UnlessExtended),
            LineToolType::HorizontalLine => Self::new(Always, Never),
            LineToolType::VerticalLine => Self::new(Never, Always),
            LineToolType::Text | LineToolType::Triangle => Self::new(Always, Always),
            LineToolType::FibRetracement | LineToolType::TrendBasedFibExtension | LineToolType::FibChannel => {
                Self::new(Never, UnlessExtended)
            }
            _ => Self::new(Never, Never),
        }
    }

    fn applies(axis: AxisCull, extended: bool) -> bool {
        match axis {
            AxisCull::Never => false,
            AxisCull::Always => true,
            AxisCull::UnlessExtended => !extended,
        }
    }

    /// Time axis check on the domain points, run before projecting
    pub fn culled_in_time(&self, points: &[DomainPoint], range: Option<TimeRange>, extended: bool) -> bool {
        Self::applies(self.horizontal, extended) && range.is_some_and(|r| off_screen_horizontally(points, r))
    }

    /// Price axis check on the projected anchors
    pub fn culled_on_price(&self, screen: &[Point], pane_height: f64, extended: bool) -> bool {
        Self::applies(self.vertical, extended) && off_screen_vertically(screen, pane_height)
    }
}

pub fn off_screen_vertically(screen: &[Point], pane_height: f64) -> bool {
    !screen.is_empty() && (screen.iter().all(|p| p.y < 0.0) || screen.iter().all(|p| p.y > pane_height))
}

pub fn off_screen_horizontally(points: &[DomainPoint], range: TimeRange) -> bool {
    !points.is_empty()
        && (points.iter().all(|p| p.timestamp < range.from) || points.iter().all(|p| p.timestamp > range.to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_disables_horizontal_culling() {
        let policy = CullPolicy::for_type(LineToolType::TrendLine);
        let points = [DomainPoint::new(1, 10.0), DomainPoint::new(2, 10.0)];
        let range = Some(TimeRange::new(100, 200));
        assert!(policy.culled_in_time(&points, range, false));
        assert!(!policy.culled_in_time(&points, range, true));
    }

    #[test]
    fn straddling_points_are_kept() {
        let points = [DomainPoint::new(1, 10.0), DomainPoint::new(300, 10.0)];
        assert!(!off_screen_horizontally(&points, TimeRange::new(100, 200)));
        let screen = [Point::new(0.0, -10.0), Point::new(0.0, 700.0)];
        assert!(!off_screen_vertically(&screen, 600.0));
    }

    #[test]
    fn horizontal_line_ignores_time() {
        let policy = CullPolicy::for_type(LineToolType::HorizontalLine);
        let points = [DomainPoint::new(1, 10.0)];
        assert!(!policy.culled_in_time(&points, Some(TimeRange::new(100, 200)), false));
        assert!(policy.culled_on_price(&[Point::new(10.0, 900.0)], 600.0, true));
    }
}
