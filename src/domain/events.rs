use crate::domain::line_tool::{EditStage, LineToolExport};
use std::fmt::Debug;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> u64 {
        use crate::domain::logging::get_time_provider;
        get_time_provider().current_timestamp()
    }
}

/// Events emitted by the line tool engine
#[derive(Debug, Clone, PartialEq)]
pub enum LineToolEvent {
    /// A tool was placed or edited; `snapshot` is an owned copy
    AfterEdit {
        snapshot: LineToolExport,
        stage: EditStage,
    },
    ToolRemoved {
        id: String,
    },
}

impl DomainEvent for LineToolEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LineToolEvent::AfterEdit { .. } => "AfterEdit",
            LineToolEvent::ToolRemoved { .. } => "ToolRemoved",
        }
    }
}

/// Event dispatcher for publishing events
pub trait EventDispatcher {
    fn publish_line_tool_event(&self, event: LineToolEvent);
}

/// Simple in-memory event dispatcher
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    line_tool_handlers: Vec<Box<dyn Fn(&LineToolEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self { line_tool_handlers: Vec::new() }
    }

    pub fn subscribe_to_line_tool_events<F>(&mut self, handler: F)
    where
        F: Fn(&LineToolEvent) + 'static,
    {
        self.line_tool_handlers.push(Box::new(handler));
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish_line_tool_event(&self, event: LineToolEvent) {
        for handler in &self.line_tool_handlers {
            handler(&event);
        }
    }
}
