//! In-place label editing. The overlay widget lives outside the engine and
//! reports back through an unbounded channel drained by the dispatcher.

use futures::{
    FutureExt, StreamExt,
    channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded},
};

use crate::application::view::LabelEdit;
use crate::domain::geometry::Rect;
use crate::domain::line_tool::{BoxHorizontalAlignment, TextOptions};

/// Vertical lift of the editor above the label box
const EDITOR_OFFSET_Y: f64 = 4.0;

/// Outcome reported by the editor widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEditMessage {
    Commit { tool_id: String, text: String },
    Cancel { tool_id: String },
}

/// Callbacks handed to the widget; both are fire-and-forget
#[derive(Debug, Clone)]
pub struct TextEditHandle {
    tool_id: String,
    sender: UnboundedSender<TextEditMessage>,
}

impl TextEditHandle {
    pub fn tool_id(&self) -> &str {
        &self.tool_id
    }

    pub fn commit(&self, text: impl Into<String>) {
        let _ = self.sender.unbounded_send(TextEditMessage::Commit { tool_id: self.tool_id.clone(), text: text.into() });
    }

    pub fn cancel(&self) {
        let _ = self.sender.unbounded_send(TextEditMessage::Cancel { tool_id: self.tool_id.clone() });
    }
}

/// Everything the widget needs to overlay the label
#[derive(Debug, Clone)]
pub struct TextEditRequest {
    pub tool_id: String,
    /// Editor box in CSS pixels
    pub rect: Rect,
    pub pixel_ratio: f64,
    /// CSS `text-align` keyword
    pub alignment: &'static str,
    pub text: TextOptions,
    pub handle: TextEditHandle,
}

impl TextEditRequest {
    /// Horizontal anchor of the editor, on the label edge named by the alignment
    pub fn pivot_x(&self) -> f64 {
        match self.alignment {
            "left" => self.rect.x,
            "right" => self.rect.right(),
            _ => self.rect.center().x,
        }
    }
}

/// Overlay text input collaborator
pub trait TextEditor {
    fn open(&mut self, request: TextEditRequest);
    fn close(&mut self);
}

/// Editor that ignores every request, used when no widget is attached
#[derive(Debug, Default)]
pub struct NoopTextEditor;

impl TextEditor for NoopTextEditor {
    fn open(&mut self, _request: TextEditRequest) {}
    fn close(&mut self) {}
}

fn css_alignment(alignment: BoxHorizontalAlignment) -> &'static str {
    match alignment {
        BoxHorizontalAlignment::Left => "left",
        BoxHorizontalAlignment::Center => "center",
        BoxHorizontalAlignment::Right => "right",
    }
}

/// Owns the receiving end of the edit channel
pub struct TextEditChannel {
    sender: UnboundedSender<TextEditMessage>,
    receiver: UnboundedReceiver<TextEditMessage>,
}

impl Default for TextEditChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEditChannel {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn request(&self, tool_id: &str, edit: LabelEdit, pixel_ratio: f64) -> TextEditRequest {
        let rect = Rect::new(edit.rect.x, edit.rect.y - EDITOR_OFFSET_Y, edit.rect.width, edit.rect.height);
        TextEditRequest {
            tool_id: tool_id.to_string(),
            rect,
            pixel_ratio,
            alignment: css_alignment(edit.alignment),
            text: edit.text,
            handle: TextEditHandle { tool_id: tool_id.to_string(), sender: self.sender.clone() },
        }
    }

    /// Messages sent since the last drain, in order
    pub fn drain(&mut self) -> Vec<TextEditMessage> {
        let mut messages = Vec::new();
        while let Some(Some(message)) = self.receiver.next().now_or_never() {
            messages.push(message);
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_tool::FontOptions;

    fn edit(alignment: BoxHorizontalAlignment) -> LabelEdit {
        LabelEdit {
            rect: Rect::new(10.0, 20.0, 100.0, 30.0),
            alignment,
            text: TextOptions::label("a".into(), FontOptions::default(), Default::default()),
        }
    }

    #[test]
    fn messages_arrive_in_order() {
        let mut channel = TextEditChannel::new();
        let request = channel.request("t1", edit(BoxHorizontalAlignment::Left), 2.0);
        request.handle.commit("first");
        request.handle.cancel();
        assert_eq!(
            channel.drain(),
            vec![
                TextEditMessage::Commit { tool_id: "t1".into(), text: "first".into() },
                TextEditMessage::Cancel { tool_id: "t1".into() },
            ]
        );
        assert!(channel.drain().is_empty());
    }

    #[test]
    fn editor_sits_above_the_label() {
        let channel = TextEditChannel::new();
        let request = channel.request("t1", edit(BoxHorizontalAlignment::Right), 1.0);
        assert_eq!(request.rect.y, 16.0);
        assert_eq!(request.alignment, "right");
        assert_eq!(request.pivot_x(), 110.0);
    }
}
