//! Axis locks applied to the pointer while the modifier key is held.

use crate::domain::geometry::Point;
use crate::domain::line_tool::ConstraintFamily;

/// What the pointer is doing when the constraint is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Placing points of a tool under construction
    Creating,
    /// Moving the anchor with the given index
    PointEdit(usize),
}

/// Returns `pointer` with its y replaced according to the family rule.
///
/// `anchors` are the current screen anchors, `initial` the anchors captured
/// on the last mouse down. Missing anchors leave the pointer untouched.
pub fn constrain(
    family: ConstraintFamily,
    mode: DragMode,
    pointer: Point,
    anchors: &[Point],
    initial: &[Point],
) -> Point {
    let y = |p: Option<&Point>| p.map(|p| p.y);
    let locked = match (family, mode) {
        (ConstraintFamily::TrendLine, DragMode::Creating) => y(anchors.first()),
        (ConstraintFamily::TrendLine, DragMode::PointEdit(index)) => match index {
            0 => y(anchors.get(1)),
            1 => y(anchors.first()),
            2 => match (anchors.first(), anchors.get(1), anchors.get(2)) {
                (Some(a), Some(b), Some(c)) => Some(c.y - (a.y - b.y)),
                _ => None,
            },
            3 => y(anchors.get(2)),
            _ => None,
        },
        (ConstraintFamily::Fibonacci, DragMode::PointEdit(index)) => y(initial.get(index)),
        (ConstraintFamily::LongShort, DragMode::PointEdit(index @ (0 | 1))) if initial.len() >= 2 => {
            y(initial.get(index))
        }
        (ConstraintFamily::Rectangle, DragMode::PointEdit(index)) if initial.len() >= 2 => match index {
            0 | 3 => y(initial.first()),
            1 | 2 => y(initial.get(1)),
            _ => None,
        },
        _ => None,
    };
    locked.map_or(pointer, |y| Point::new(pointer.x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHORS: [Point; 2] = [Point { x: 0.0, y: 100.0 }, Point { x: 50.0, y: 200.0 }];

    #[test]
    fn trend_endpoints_lock_to_the_opposite_anchor() {
        let pointer = Point::new(30.0, 170.0);
        let p0 = constrain(ConstraintFamily::TrendLine, DragMode::PointEdit(0), pointer, &ANCHORS, &[]);
        let p1 = constrain(ConstraintFamily::TrendLine, DragMode::PointEdit(1), pointer, &ANCHORS, &[]);
        assert_eq!(p0, Point::new(30.0, 200.0));
        assert_eq!(p1, Point::new(30.0, 100.0));
    }

    #[test]
    fn trend_creation_locks_to_the_first_anchor() {
        let p = constrain(ConstraintFamily::TrendLine, DragMode::Creating, Point::new(1.0, 2.0), &ANCHORS, &[]);
        assert_eq!(p.y, 100.0);
    }

    #[test]
    fn channel_offset_anchor_keeps_the_slope() {
        let anchors = [Point::new(0.0, 100.0), Point::new(50.0, 80.0), Point::new(0.0, 150.0)];
        let p = constrain(ConstraintFamily::TrendLine, DragMode::PointEdit(2), Point::new(5.0, 0.0), &anchors, &[]);
        assert_eq!(p.y, 130.0);
    }

    #[test]
    fn rectangle_corners_are_paired() {
        let initial = [Point::new(0.0, 10.0), Point::new(100.0, 90.0)];
        let pointer = Point::new(40.0, 55.0);
        let c3 = constrain(ConstraintFamily::Rectangle, DragMode::PointEdit(3), pointer, &[], &initial);
        let c2 = constrain(ConstraintFamily::Rectangle, DragMode::PointEdit(2), pointer, &[], &initial);
        assert_eq!(c3.y, 10.0);
        assert_eq!(c2.y, 90.0);
    }

    #[test]
    fn unconstrained_families_follow_the_pointer() {
        let pointer = Point::new(3.0, 4.0);
        assert_eq!(constrain(ConstraintFamily::None, DragMode::PointEdit(0), pointer, &ANCHORS, &ANCHORS), pointer);
        assert_eq!(constrain(ConstraintFamily::LongShort, DragMode::PointEdit(2), pointer, &[], &ANCHORS), pointer);
    }
}
