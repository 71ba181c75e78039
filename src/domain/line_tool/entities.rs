use serde::{Deserialize, Serialize};

use super::long_short::LongShortState;
use super::options::LineToolOptions;
use super::value_objects::{DomainPoint, LineToolType};
use crate::domain::logging::LogComponent;
use crate::log_debug;

/// Owned, decoupled copy of a tool handed to after-edit listeners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineToolExport {
    pub id: String,
    pub tool_type: LineToolType,
    pub points: Vec<DomainPoint>,
    pub options: LineToolOptions,
}

/// Runtime interaction flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ToolState {
    finished: bool,
    creating: bool,
    editing: bool,
    selected: bool,
    hovered: bool,
}

/// Entity - a line tool placed on the chart
///
/// Owns the domain points and the lifecycle flags. `editing` can only be
/// raised on a finished tool and `creating` is never set together with
/// `finished`.
#[derive(Debug, Clone)]
pub struct LineTool {
    id: String,
    tool_type: LineToolType,
    points: Vec<DomainPoint>,
    /// Uncommitted point following the pointer during creation
    last_point: Option<DomainPoint>,
    options: LineToolOptions,
    state: ToolState,
    long_short: LongShortState,
}

impl LineTool {
    /// Fresh tool waiting for its first click
    pub fn new(id: impl Into<String>, tool_type: LineToolType, options: LineToolOptions) -> Self {
        Self {
            id: id.into(),
            tool_type,
            points: Vec::with_capacity(tool_type.points_count()),
            last_point: None,
            options,
            state: ToolState { creating: true, ..Default::default() },
            long_short: LongShortState::default(),
        }
    }

    /// Tool restored with its points already placed
    pub fn with_points(
        id: impl Into<String>,
        tool_type: LineToolType,
        options: LineToolOptions,
        points: Vec<DomainPoint>,
    ) -> Self {
        let mut tool = Self::new(id, tool_type, options);
        tool.set_points(points);
        if tool.try_finish() && tool_type == LineToolType::LongShortPosition {
            tool.long_short.click_count = 2;
            tool.long_short.is_long = super::long_short::is_long(tool.points[0].price, tool.points[1].price);
        }
        tool
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tool_type(&self) -> LineToolType {
        self.tool_type
    }

    pub fn points_count(&self) -> usize {
        self.tool_type.points_count()
    }

    /// Committed points followed by the creation preview, if any
    pub fn points(&self) -> Vec<DomainPoint> {
        let mut points = self.points.clone();
        if let Some(preview) = self.last_point {
            if !self.state.finished && points.len() < self.points_count() {
                points.push(preview);
            }
        }
        points
    }

    pub fn committed_points(&self) -> &[DomainPoint] {
        &self.points
    }

    pub fn add_point(&mut self, point: DomainPoint) {
        if self.state.finished || self.points.len() >= self.points_count() {
            return;
        }
        self.points.push(point);
        self.last_point = None;
    }

    pub fn set_point(&mut self, index: usize, point: DomainPoint) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
        }
    }

    pub fn set_points(&mut self, mut points: Vec<DomainPoint>) {
        points.truncate(self.points_count());
        self.points = points;
    }

    pub fn set_last_point(&mut self, point: Option<DomainPoint>) {
        self.last_point = point;
    }

    /// Finishes creation once every point is placed
    pub fn try_finish(&mut self) -> bool {
        if self.state.finished {
            return true;
        }
        if self.points.len() < self.points_count() {
            return false;
        }
        self.state.finished = true;
        self.state.creating = false;
        self.last_point = None;
        log_debug!(LogComponent::Domain("LineTool"), "{} {} finished", self.tool_type, self.id);
        true
    }

    pub fn finished(&self) -> bool {
        self.state.finished
    }

    pub fn creating(&self) -> bool {
        self.state.creating
    }

    pub fn set_creating(&mut self, creating: bool) {
        self.state.creating = creating && !self.state.finished;
    }

    pub fn editing(&self) -> bool {
        self.state.editing
    }

    /// Ignored while the tool is still being placed
    pub fn set_editing(&mut self, editing: bool) {
        self.state.editing = editing && self.state.finished;
    }

    pub fn selected(&self) -> bool {
        self.state.selected
    }

    /// Returns whether the flag changed
    pub fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.state.selected != selected;
        self.state.selected = selected;
        changed
    }

    pub fn hovered(&self) -> bool {
        self.state.hovered
    }

    /// Returns whether the flag changed
    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        let changed = self.state.hovered != hovered;
        self.state.hovered = hovered;
        changed
    }

    pub fn options(&self) -> &LineToolOptions {
        &self.options
    }

    pub fn apply_options(&mut self, options: LineToolOptions) {
        self.options = options;
    }

    pub fn set_text(&mut self, value: String) {
        self.options.text.value = value;
    }

    pub fn visible(&self) -> bool {
        self.options.visible
    }

    pub fn editable(&self) -> bool {
        self.options.editable
    }

    pub fn locked(&self) -> bool {
        self.options.locked
    }

    pub fn long_short(&self) -> LongShortState {
        self.long_short
    }

    pub fn long_short_mut(&mut self) -> &mut LongShortState {
        &mut self.long_short
    }

    /// Deep copy for listeners; later edits never leak into it
    pub fn export(&self) -> LineToolExport {
        LineToolExport {
            id: self.id.clone(),
            tool_type: self.tool_type,
            points: self.points.clone(),
            options: self.options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend() -> LineTool {
        LineTool::new("t1", LineToolType::TrendLine, LineToolOptions::default())
    }

    #[test]
    fn editing_requires_finished_tool() {
        let mut tool = trend();
        tool.set_editing(true);
        assert!(!tool.editing());

        tool.add_point(DomainPoint::new(1, 10.0));
        tool.add_point(DomainPoint::new(2, 20.0));
        assert!(tool.try_finish());
        assert!(!tool.creating());
        tool.set_editing(true);
        assert!(tool.editing());
    }

    #[test]
    fn preview_point_is_appended_while_creating() {
        let mut tool = trend();
        tool.add_point(DomainPoint::new(1, 10.0));
        tool.set_last_point(Some(DomainPoint::new(5, 15.0)));
        assert_eq!(tool.points().len(), 2);
        assert_eq!(tool.committed_points().len(), 1);
    }

    #[test]
    fn extra_points_are_ignored() {
        let mut tool = trend();
        for i in 0..4 {
            tool.add_point(DomainPoint::new(i, i as f64));
        }
        assert_eq!(tool.committed_points().len(), 2);
    }

    #[test]
    fn export_is_decoupled() {
        let mut tool = LineTool::with_points(
            "t2",
            LineToolType::TrendLine,
            LineToolOptions::default(),
            vec![DomainPoint::new(1, 1.0), DomainPoint::new(2, 2.0)],
        );
        let snapshot = tool.export();
        tool.set_point(0, DomainPoint::new(9, 9.0));
        assert_eq!(snapshot.points[0], DomainPoint::new(1, 1.0));
    }
}
