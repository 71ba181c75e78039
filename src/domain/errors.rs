/// Errors surfaced by the line tool API. The engine itself never raises
/// them: missing preconditions are skipped and the previous frame stays.
#[derive(Debug, Clone, PartialEq)]
pub enum LineToolError {
    UnknownToolType(String),
    InvalidOptions(String),
    ToolNotFound(String),
    UnknownEvent(String),
}

impl std::fmt::Display for LineToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineToolError::UnknownToolType(name) => write!(f, "Unknown tool type: {}", name),
            LineToolError::InvalidOptions(msg) => write!(f, "Invalid options: {}", msg),
            LineToolError::ToolNotFound(id) => write!(f, "Tool not found: {}", id),
            LineToolError::UnknownEvent(kind) => write!(f, "Unknown event: {}", kind),
        }
    }
}

impl std::error::Error for LineToolError {}

impl From<serde_json::Error> for LineToolError {
    fn from(err: serde_json::Error) -> Self {
        LineToolError::InvalidOptions(err.to_string())
    }
}

pub type ToolResult<T> = Result<T, LineToolError>;
