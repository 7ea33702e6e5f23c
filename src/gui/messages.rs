//! Message types for the Kana Quest GUI

use crate::canvas::Point;
use crate::flow::Event;

/// Pointer input on the drawing board
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeInput {
    Begin(Point),
    Extend(Point),
    End,
}

/// GUI messages
#[derive(Debug, Clone)]
pub enum Message {
    /// Forwarded to the session state machine
    Event(Event),

    // Drawing board
    Stroke(StrokeInput),
    ClearDrawing,
    SubmitDrawing,

    // Housekeeping
    DismissNotice,
    SpeechFinished,
    None,
}

impl From<Event> for Message {
    fn from(event: Event) -> Self {
        Message::Event(event)
    }
}
