//! Events consumed and effects produced by the session state machine

use std::time::Duration;

use crate::content::{CharId, VocabId, VocabSet};
use crate::verify::Verdict;

/// Everything that can happen to a session: user actions, fired timers
/// and results coming back from the external judge.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Navigation
    Start,
    Ready,
    ChooseHiragana,
    ChooseVocab,
    ChooseVocabSet(VocabSet),
    GoHome,
    StoryDone,

    // Learning boards
    LearnChar(CharId),
    LearnVocab(VocabId),

    // Listen-and-choose games
    PickChar(CharId),
    PickVocab(VocabId),
    ReplayTarget,

    // Handwriting game
    DrawingSubmitted(Vec<u8>),
    DrawingRejected,
    DrawingCleared,
    HandwritingJudged {
        attempt: Attempt,
        result: Result<Verdict, String>,
    },

    // Pronunciation game
    RecordPressed,
    RecordReleased,
    /// The microphone could not be opened
    RecordingFailed(String),
    /// The recording could not be stopped or encoded
    RecordingLost(String),
    RecordingFinished(Vec<u8>),
    PronunciationJudged { attempt: Attempt, verdict: Verdict },

    // Scheduled
    TimerFired(TimerTicket),
}

/// Side effects the shell must carry out on behalf of the session
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Speak(String),
    Preload(Vec<String>),
    Schedule { ticket: TimerTicket, delay: Duration },
    VerifyHandwriting {
        attempt: Attempt,
        image: Vec<u8>,
        glyph: String,
    },
    VerifyPronunciation {
        attempt: Attempt,
        audio: Vec<u8>,
        word: String,
    },
    StartRecording,
    StopRecording,
    /// Blocking notice shown to the learner
    Notice(String),
    ResetCanvas,
}

/// What a scheduled timer will do when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Every hiragana card is done: move on to the listening game
    LearningMastered,
    /// Every vocab card is done: move on to the vocab listening game
    VocabMastered,
    /// Correct choice shown long enough: next target or next game
    ChoiceAdvance,
    /// Wrong choice shown long enough: let the learner pick again
    ChoiceClear,
    HandwritingAdvance,
    PronunciationAdvance,
}

impl TimerKind {
    pub fn delay(self) -> Duration {
        match self {
            TimerKind::LearningMastered | TimerKind::VocabMastered => Duration::from_millis(800),
            TimerKind::ChoiceAdvance => Duration::from_millis(1200),
            TimerKind::ChoiceClear => Duration::from_millis(800),
            TimerKind::HandwritingAdvance => Duration::from_millis(2000),
            TimerKind::PronunciationAdvance => Duration::from_millis(2500),
        }
    }
}

/// A timer tagged with the session epoch it was scheduled against.
/// Tickets from an older epoch are ignored when they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTicket {
    pub epoch: u64,
    pub kind: TimerKind,
}

/// The target a verification request was made for. The verdict has to
/// come back with the same attempt or it is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attempt {
    pub epoch: u64,
    pub index: usize,
}

/// Outcome of the last listen-and-choose pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChoiceFeedback {
    #[default]
    None,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Outcome of the last verification attempt, shown under the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            text: text.into(),
        }
    }
}
