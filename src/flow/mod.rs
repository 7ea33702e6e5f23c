//! Screen flow
//!
//! The session state machine that owns all learning and game progress.
//! It is a plain reducer: `Session::update` takes an [`Event`] and returns
//! the [`Effect`]s the shell has to perform (speech, timers, verification
//! calls, recording). Nothing in here touches audio, network or widgets.

pub mod messages;
pub mod screen;
pub mod session;

pub use messages::{
    Attempt, ChoiceFeedback, Effect, Event, Feedback, FeedbackKind, TimerKind, TimerTicket,
};
pub use screen::Screen;
pub use session::Session;
