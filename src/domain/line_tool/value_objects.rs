use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - logical point of a tool, independent of zoom
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct DomainPoint {
    pub timestamp: i64,
    pub price: f64,
}

/// Every tool type the engine can place
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum LineToolType {
    #[display(fmt = "Trend Line")]
    TrendLine,
    #[display(fmt = "Ray")]
    Ray,
    #[display(fmt = "Arrow")]
    Arrow,
    #[display(fmt = "Extended Line")]
    ExtendedLine,
    #[display(fmt = "Horizontal Ray")]
    HorizontalRay,
    #[display(fmt = "Horizontal Line")]
    HorizontalLine,
    #[display(fmt = "Vertical Line")]
    VerticalLine,
    #[display(fmt = "Parallel Channel")]
    ParallelChannel,
    #[display(fmt = "Callout")]
    Callout,
    #[display(fmt = "Text")]
    Text,
    #[display(fmt = "Rectangle")]
    Rectangle,
    #[display(fmt = "Price Range")]
    PriceRange,
    #[display(fmt = "Circle")]
    Circle,
    #[display(fmt = "Triangle")]
    Triangle,
    #[display(fmt = "Long/Short Position")]
    LongShortPosition,
    #[display(fmt = "Fib Retracement")]
    FibRetracement,
    #[display(fmt = "Trend-Based Fib Extension")]
    TrendBasedFibExtension,
    #[display(fmt = "Fib Channel")]
    FibChannel,
    #[display(fmt = "Fib Time Zone")]
    FibTimeZone,
    #[display(fmt = "Trend-Based Fib Time")]
    TrendBasedFibTime,
    #[display(fmt = "Fib Speed Resistance Fan")]
    FibSpeedResistanceFan,
    #[display(fmt = "Fib Speed Resistance Arcs")]
    FibSpeedResistanceArcs,
    #[display(fmt = "Fib Circles")]
    FibCircles,
    #[display(fmt = "Fib Spiral")]
    FibSpiral,
    #[display(fmt = "Fib Wedge")]
    FibWedge,
    #[display(fmt = "Pitchfan")]
    Pitchfan,
}

/// Which drag constraint applies while the modifier key is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintFamily {
    TrendLine,
    Fibonacci,
    Rectangle,
    LongShort,
    None,
}

impl LineToolType {
    /// Fixed number of domain points the tool collects
    pub fn points_count(&self) -> usize {
        match self {
            LineToolType::HorizontalRay
            | LineToolType::HorizontalLine
            | LineToolType::VerticalLine
            | LineToolType::Text => 1,
            LineToolType::ParallelChannel
            | LineToolType::Triangle
            | LineToolType::LongShortPosition
            | LineToolType::TrendBasedFibExtension
            | LineToolType::FibChannel
            | LineToolType::TrendBasedFibTime
            | LineToolType::FibWedge
            | LineToolType::Pitchfan => 3,
            _ => 2,
        }
    }

    pub fn constraint_family(&self) -> ConstraintFamily {
        match self {
            LineToolType::TrendLine
            | LineToolType::Ray
            | LineToolType::Arrow
            | LineToolType::ExtendedLine
            | LineToolType::ParallelChannel => ConstraintFamily::TrendLine,
            LineToolType::FibRetracement
            | LineToolType::TrendBasedFibExtension
            | LineToolType::FibChannel
            | LineToolType::FibTimeZone
            | LineToolType::TrendBasedFibTime
            | LineToolType::FibSpeedResistanceFan
            | LineToolType::FibSpeedResistanceArcs
            | LineToolType::FibCircles
            | LineToolType::FibSpiral
            | LineToolType::FibWedge
            | LineToolType::Pitchfan => ConstraintFamily::Fibonacci,
            LineToolType::Rectangle | LineToolType::PriceRange => ConstraintFamily::Rectangle,
            LineToolType::LongShortPosition => ConstraintFamily::LongShort,
            _ => ConstraintFamily::None,
        }
    }

    pub fn has_levels(&self) -> bool {
        self.constraint_family() == ConstraintFamily::Fibonacci
    }
}

/// Stage tag carried by the after-edit notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditStage {
    #[display(fmt = "lineToolFinished")]
    #[strum(serialize = "lineToolFinished")]
    LineToolFinished,
    #[display(fmt = "pathFinished")]
    #[strum(serialize = "pathFinished")]
    PathFinished,
    #[display(fmt = "lineToolEdited")]
    #[strum(serialize = "lineToolEdited")]
    LineToolEdited,
}

/// Cursor hint, serialised as the CSS cursor keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum CursorType {
    #[default]
    #[strum(serialize = "default")]
    Default,
    #[strum(serialize = "pointer")]
    Pointer,
    #[strum(serialize = "move")]
    Move,
    #[strum(serialize = "grabbing")]
    Grabbing,
    #[strum(serialize = "not-allowed")]
    NotAllowed,
    #[strum(serialize = "ns-resize")]
    VerticalResize,
    #[strum(serialize = "ew-resize")]
    HorizontalResize,
    #[strum(serialize = "nesw-resize")]
    DiagonalNeSwResize,
    #[strum(serialize = "nwse-resize")]
    DiagonalNwSeResize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTestType {
    Regular,
    MovePoint,
    MovePointBackground,
    ChangePoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitTestData {
    pub point_index: Option<usize>,
    pub cursor: Option<CursorType>,
    /// Hit landed on an editable text label
    pub text_label: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitTestResult {
    pub hit_type: HitTestType,
    pub data: HitTestData,
}

impl HitTestResult {
    pub fn new(hit_type: HitTestType) -> Self {
        Self { hit_type, data: HitTestData::default() }
    }

    pub fn with_data(hit_type: HitTestType, data: HitTestData) -> Self {
        Self { hit_type, data }
    }

    pub fn point_index(&self) -> Option<usize> {
        self.data.point_index
    }

    pub fn cursor(&self) -> Option<CursorType> {
        self.data.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn tool_types_parse_from_their_names() {
        for tool in LineToolType::iter() {
            assert_eq!(LineToolType::from_str(tool.as_ref()), Ok(tool));
        }
        assert!(LineToolType::from_str("Brush").is_err());
    }

    #[test]
    fn every_tool_collects_one_to_three_points() {
        assert!(LineToolType::iter().all(|t| (1..=3).contains(&t.points_count())));
        assert_eq!(LineToolType::FibWedge.points_count(), 3);
        assert_eq!(LineToolType::Text.points_count(), 1);
    }

    #[test]
    fn cursor_serialises_to_css_keyword() {
        assert_eq!(CursorType::DiagonalNwSeResize.as_ref(), "nwse-resize");
    }
}
