//! JSON option patches coming from the host page.

use serde_json::{Value, json};

use crate::domain::errors::ToolResult;
use crate::domain::events::LineToolEvent;
use crate::domain::line_tool::LineToolOptions;

/// Overlays `patch` on `base`; objects merge key by key, anything else replaces.
fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, patch) => *base = patch,
    }
}

/// Options of `base` with the fields named in `patch` replaced.
/// An empty patch returns `base` unchanged.
pub fn patch_options(base: &LineToolOptions, patch: &str) -> ToolResult<LineToolOptions> {
    if patch.trim().is_empty() {
        return Ok(base.clone());
    }
    let mut value = serde_json::to_value(base)?;
    merge(&mut value, serde_json::from_str(patch)?);
    Ok(serde_json::from_value(value)?)
}

/// Event payload handed to the host callback
pub fn event_json(event: &LineToolEvent) -> Value {
    match event {
        LineToolEvent::AfterEdit { snapshot, stage } => json!({
            "type": "afterEdit",
            "stage": stage.as_ref(),
            "tool": snapshot,
        }),
        LineToolEvent::ToolRemoved { id } => json!({ "type": "toolRemoved", "id": id }),
    }
}
