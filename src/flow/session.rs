//! Session state and the single update entry point

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::messages::{
    Attempt, ChoiceFeedback, Effect, Event, Feedback, TimerKind, TimerTicket,
};
use super::screen::Screen;
use crate::content::{
    self, phrases, CharId, CharacterData, LearnItem, VocabData, VocabId, VocabSet,
    HIRAGANA_A_COLUMN,
};
use crate::progress::{Coins, LearnBoard, LearnState, RewardRoute, TargetSequence, Track};
use crate::verify::Verdict;

/// All progress of one learner, for the lifetime of the app
pub struct Session {
    screen: Screen,
    coins: Coins,

    // Hiragana track
    chars: LearnBoard<CharacterData>,
    char_targets: TargetSequence<CharacterData>,

    // Vocabulary track
    vocab_set: Option<VocabSet>,
    vocab: LearnBoard<VocabData>,
    vocab_targets: TargetSequence<VocabData>,

    choice_feedback: ChoiceFeedback,
    feedback: Option<Feedback>,
    is_verifying: bool,
    is_recording: bool,

    /// Bumped on every screen change and target advance; timers scheduled
    /// under an older epoch are stale
    epoch: u64,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic shuffles, for tests and replays
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            screen: Screen::Home,
            coins: Coins::default(),
            chars: LearnBoard::default(),
            char_targets: TargetSequence::default(),
            vocab_set: None,
            vocab: LearnBoard::default(),
            vocab_targets: TargetSequence::default(),
            choice_feedback: ChoiceFeedback::None,
            feedback: None,
            is_verifying: false,
            is_recording: false,
            epoch: 0,
            rng,
        }
    }

    /// Effects to run once when the app comes up
    pub fn boot(&self) -> Vec<Effect> {
        vec![Effect::Preload(content::startup_preload())]
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn coins(&self) -> u32 {
        self.coins.count()
    }

    pub fn chars(&self) -> &LearnBoard<CharacterData> {
        &self.chars
    }

    pub fn char_targets(&self) -> &TargetSequence<CharacterData> {
        &self.char_targets
    }

    pub fn vocab_set(&self) -> Option<VocabSet> {
        self.vocab_set
    }

    pub fn vocab(&self) -> &LearnBoard<VocabData> {
        &self.vocab
    }

    pub fn vocab_targets(&self) -> &TargetSequence<VocabData> {
        &self.vocab_targets
    }

    pub fn choice_feedback(&self) -> ChoiceFeedback {
        self.choice_feedback
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_verifying(&self) -> bool {
        self.is_verifying
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The verification attempt a submission made right now would belong to
    pub fn attempt(&self) -> Attempt {
        let index = match self.screen {
            Screen::Game2 => self.char_targets.index(),
            Screen::VocabGame2 => self.vocab_targets.index(),
            _ => 0,
        };
        Attempt {
            epoch: self.epoch,
            index,
        }
    }

    /// A passed verification is on screen and its advance is pending
    pub fn awaiting_advance(&self) -> bool {
        self.feedback.as_ref().is_some_and(Feedback::is_success)
    }

    /// Apply one event and report what the shell has to do about it
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Start => self.navigate(Screen::Home, Screen::Instructions),
            Event::Ready => self.navigate(Screen::Instructions, Screen::Menu),
            Event::ChooseHiragana => {
                if self.screen != Screen::Menu {
                    return Vec::new();
                }
                self.chars = LearnBoard::new(HIRAGANA_A_COLUMN);
                self.set_screen(Screen::Learning);
                Vec::new()
            }
            Event::ChooseVocab => self.navigate(Screen::Menu, Screen::VocabMenu),
            Event::ChooseVocabSet(set) => {
                if self.screen != Screen::VocabMenu {
                    return Vec::new();
                }
                info!("📚 Vocabulary set chosen: {}", set.title());
                self.vocab_set = Some(set);
                self.vocab = LearnBoard::new(set.items());
                self.set_screen(Screen::VocabLearning);
                vec![Effect::Preload(
                    set.items().iter().map(|v| v.word.to_string()).collect(),
                )]
            }
            Event::GoHome => {
                if !self.screen.shows_header() {
                    return Vec::new();
                }
                if self.is_recording {
                    self.is_recording = false;
                    self.set_screen(Screen::Home);
                    return vec![Effect::StopRecording];
                }
                self.set_screen(Screen::Home);
                Vec::new()
            }
            Event::StoryDone => match self.screen {
                Screen::Story => {
                    info!("🔄 Adventure complete, starting over");
                    self.coins.reset();
                    self.set_screen(Screen::Home);
                    Vec::new()
                }
                Screen::VocabStory => {
                    self.set_screen(Screen::Menu);
                    Vec::new()
                }
                _ => Vec::new(),
            },

            Event::LearnChar(id) => self.learn_char(id),
            Event::LearnVocab(id) => self.learn_vocab(id),

            Event::PickChar(id) => self.pick_char(id),
            Event::PickVocab(id) => self.pick_vocab(id),
            Event::ReplayTarget => self.replay_target(),

            Event::DrawingSubmitted(image) => self.submit_drawing(image),
            Event::DrawingRejected => {
                debug!("✏️ Empty drawing rejected locally");
                Vec::new()
            }
            Event::DrawingCleared => {
                if self.screen == Screen::Game2 && !self.is_verifying && !self.awaiting_advance() {
                    self.feedback = None;
                }
                Vec::new()
            }
            Event::HandwritingJudged { attempt, result } => {
                self.handwriting_judged(attempt, result)
            }

            Event::RecordPressed => {
                if self.screen != Screen::VocabGame2
                    || self.is_verifying
                    || self.is_recording
                    || self.awaiting_advance()
                {
                    return Vec::new();
                }
                self.is_recording = true;
                vec![Effect::StartRecording]
            }
            Event::RecordReleased => {
                if !self.is_recording {
                    return Vec::new();
                }
                self.is_recording = false;
                vec![Effect::StopRecording]
            }
            Event::RecordingFailed(reason) => {
                warn!("🎙️ Microphone unavailable: {}", reason);
                self.is_recording = false;
                if self.screen != Screen::VocabGame2 {
                    return Vec::new();
                }
                vec![Effect::Notice(phrases::MIC_PERMISSION.to_string())]
            }
            Event::RecordingLost(reason) => {
                warn!("🎙️ Recording lost: {}", reason);
                self.is_recording = false;
                Vec::new()
            }
            Event::RecordingFinished(audio) => self.submit_recording(audio),
            Event::PronunciationJudged { attempt, verdict } => {
                self.pronunciation_judged(attempt, verdict)
            }

            Event::TimerFired(ticket) => self.timer_fired(ticket),
        }
    }

    fn navigate(&mut self, from: Screen, to: Screen) -> Vec<Effect> {
        if self.screen == from {
            self.set_screen(to);
        }
        Vec::new()
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            info!("🧭 Screen: {} -> {}", self.screen, screen);
        }
        self.screen = screen;
        self.epoch += 1;
        self.choice_feedback = ChoiceFeedback::None;
        self.feedback = None;
    }

    fn schedule(&self, kind: TimerKind) -> Effect {
        Effect::Schedule {
            ticket: TimerTicket {
                epoch: self.epoch,
                kind,
            },
            delay: kind.delay(),
        }
    }

    fn speak(text: &str) -> Effect {
        Effect::Speak(text.to_string())
    }

    // --- Learning boards ---

    fn learn_char(&mut self, id: CharId) -> Vec<Effect> {
        if self.screen != Screen::Learning {
            return Vec::new();
        }
        let Some(state) = self.chars.advance(id) else {
            return Vec::new();
        };
        let mut effects = vec![Self::speak(id.0)];
        if state == LearnState::Done && self.chars.is_mastered() {
            debug!("🌟 All hiragana cards done");
            effects.push(self.schedule(TimerKind::LearningMastered));
        }
        effects
    }

    fn learn_vocab(&mut self, id: VocabId) -> Vec<Effect> {
        if self.screen != Screen::VocabLearning {
            return Vec::new();
        }
        let Some(word) = self.vocab.item(id).map(|v| v.word) else {
            return Vec::new();
        };
        let Some(state) = self.vocab.advance(id) else {
            return Vec::new();
        };
        let mut effects = vec![Self::speak(word)];
        if state == LearnState::Done && self.vocab.is_mastered() {
            debug!("🌟 All vocabulary cards done");
            effects.push(self.schedule(TimerKind::VocabMastered));
        }
        effects
    }

    // --- Listen-and-choose ---

    fn pick_char(&mut self, id: CharId) -> Vec<Effect> {
        if self.screen != Screen::Game1 || self.choice_feedback != ChoiceFeedback::None {
            return Vec::new();
        }
        let Some(target) = self.char_targets.current() else {
            return Vec::new();
        };
        self.judge_choice(target.id() == id)
    }

    fn pick_vocab(&mut self, id: VocabId) -> Vec<Effect> {
        if self.screen != Screen::VocabGame1 || self.choice_feedback != ChoiceFeedback::None {
            return Vec::new();
        }
        let Some(target) = self.vocab_targets.current() else {
            return Vec::new();
        };
        self.judge_choice(target.id() == id)
    }

    fn judge_choice(&mut self, correct: bool) -> Vec<Effect> {
        if correct {
            self.choice_feedback = ChoiceFeedback::Correct;
            vec![
                Self::speak(phrases::CORRECT),
                self.schedule(TimerKind::ChoiceAdvance),
            ]
        } else {
            self.choice_feedback = ChoiceFeedback::Wrong;
            vec![
                Self::speak(phrases::REGRET),
                self.schedule(TimerKind::ChoiceClear),
            ]
        }
    }

    fn replay_target(&self) -> Vec<Effect> {
        let spoken = match self.screen {
            Screen::Game1 | Screen::Game2 => self.char_targets.current().map(|c| c.spoken()),
            Screen::VocabGame1 => self.vocab_targets.current().map(|v| v.spoken()),
            _ => None,
        };
        spoken.map(Self::speak).into_iter().collect()
    }

    // --- Handwriting ---

    fn submit_drawing(&mut self, image: Vec<u8>) -> Vec<Effect> {
        if self.screen != Screen::Game2 || self.is_verifying || self.awaiting_advance() {
            debug!("✏️ Drawing ignored (screen {}, verifying {})", self.screen, self.is_verifying);
            return Vec::new();
        }
        let Some(target) = self.char_targets.current() else {
            return Vec::new();
        };
        let glyph = target.glyph.to_string();
        self.is_verifying = true;
        self.feedback = None;
        vec![Effect::VerifyHandwriting {
            attempt: self.attempt(),
            image,
            glyph,
        }]
    }

    fn handwriting_judged(
        &mut self,
        attempt: Attempt,
        result: Result<Verdict, String>,
    ) -> Vec<Effect> {
        self.is_verifying = false;
        if self.screen != Screen::Game2 || attempt != self.attempt() || self.awaiting_advance() {
            debug!("✏️ Stale handwriting verdict dropped ({:?})", attempt);
            return Vec::new();
        }
        match result {
            Ok(verdict) if verdict.is_correct => {
                let text = non_empty_or(verdict.feedback, phrases::WRITE_PRAISE);
                self.feedback = Some(Feedback::success(text));
                vec![
                    Self::speak(phrases::WONDERFUL),
                    self.schedule(TimerKind::HandwritingAdvance),
                ]
            }
            Ok(verdict) => {
                let text = non_empty_or(verdict.feedback, phrases::TRY_AGAIN);
                self.feedback = Some(Feedback::error(text));
                vec![Self::speak(phrases::CLOSE)]
            }
            Err(reason) => {
                warn!("✏️ Handwriting verification failed: {}", reason);
                self.feedback = Some(Feedback::error(phrases::TRY_AGAIN));
                vec![Self::speak(phrases::CLOSE)]
            }
        }
    }

    // --- Pronunciation ---

    fn submit_recording(&mut self, audio: Vec<u8>) -> Vec<Effect> {
        if self.screen != Screen::VocabGame2 || self.is_verifying || self.awaiting_advance() {
            debug!("🎙️ Recording ignored (screen {}, verifying {})", self.screen, self.is_verifying);
            return Vec::new();
        }
        let Some(target) = self.vocab_targets.current() else {
            return Vec::new();
        };
        let word = target.word.to_string();
        self.is_verifying = true;
        self.feedback = None;
        vec![Effect::VerifyPronunciation {
            attempt: self.attempt(),
            audio,
            word,
        }]
    }

    fn pronunciation_judged(&mut self, attempt: Attempt, verdict: Verdict) -> Vec<Effect> {
        self.is_verifying = false;
        if self.screen != Screen::VocabGame2
            || attempt != self.attempt()
            || self.awaiting_advance()
        {
            debug!("🎙️ Stale pronunciation verdict dropped ({:?})", attempt);
            return Vec::new();
        }
        if verdict.is_correct {
            self.feedback = Some(Feedback::success(verdict.feedback));
            vec![
                Self::speak(phrases::WONDERFUL),
                self.schedule(TimerKind::PronunciationAdvance),
            ]
        } else {
            self.feedback = Some(Feedback::error(verdict.feedback));
            vec![Self::speak(phrases::CLOSE)]
        }
    }

    // --- Timers ---

    fn timer_fired(&mut self, ticket: TimerTicket) -> Vec<Effect> {
        if ticket.epoch != self.epoch {
            debug!(
                "⌛ Stale timer {:?} ignored (epoch {} != {})",
                ticket.kind, ticket.epoch, self.epoch
            );
            return Vec::new();
        }
        match ticket.kind {
            TimerKind::LearningMastered => self.enter_char_game(),
            TimerKind::VocabMastered => self.enter_vocab_game(),
            TimerKind::ChoiceClear => {
                if self.choice_feedback == ChoiceFeedback::Wrong {
                    self.choice_feedback = ChoiceFeedback::None;
                }
                Vec::new()
            }
            TimerKind::ChoiceAdvance => self.advance_choice(),
            TimerKind::HandwritingAdvance => self.advance_handwriting(),
            TimerKind::PronunciationAdvance => self.advance_pronunciation(),
        }
    }

    fn enter_char_game(&mut self) -> Vec<Effect> {
        if self.screen != Screen::Learning || !self.chars.is_mastered() {
            return Vec::new();
        }
        self.char_targets = TargetSequence::shuffled(self.chars.items(), &mut self.rng);
        self.set_screen(Screen::Game1);
        self.char_targets
            .current()
            .map(|c| Self::speak(c.spoken()))
            .into_iter()
            .collect()
    }

    fn enter_vocab_game(&mut self) -> Vec<Effect> {
        if self.screen != Screen::VocabLearning || !self.vocab.is_mastered() {
            return Vec::new();
        }
        self.vocab_targets = TargetSequence::shuffled(self.vocab.items(), &mut self.rng);
        self.set_screen(Screen::VocabGame1);
        self.vocab_targets
            .current()
            .map(|v| Self::speak(v.spoken()))
            .into_iter()
            .collect()
    }

    fn advance_choice(&mut self) -> Vec<Effect> {
        if self.choice_feedback != ChoiceFeedback::Correct {
            return Vec::new();
        }
        self.choice_feedback = ChoiceFeedback::None;
        match self.screen {
            Screen::Game1 => match self.char_targets.advance() {
                Some(next) => {
                    self.epoch += 1;
                    vec![Self::speak(next.spoken())]
                }
                None => {
                    let first = self.char_targets.rewind();
                    self.set_screen(Screen::Game2);
                    let mut effects = vec![Effect::ResetCanvas];
                    effects.extend(first.map(|c| Self::speak(c.spoken())));
                    effects
                }
            },
            Screen::VocabGame1 => match self.vocab_targets.advance() {
                Some(next) => {
                    self.epoch += 1;
                    vec![Self::speak(next.spoken())]
                }
                None => {
                    self.vocab_targets.rewind();
                    self.set_screen(Screen::VocabGame2);
                    Vec::new()
                }
            },
            _ => Vec::new(),
        }
    }

    fn advance_handwriting(&mut self) -> Vec<Effect> {
        if self.screen != Screen::Game2 {
            return Vec::new();
        }
        self.feedback = None;
        match self.char_targets.advance() {
            Some(next) => {
                self.epoch += 1;
                vec![Effect::ResetCanvas, Self::speak(next.spoken())]
            }
            None => {
                self.award(Track::Hiragana);
                vec![Effect::ResetCanvas]
            }
        }
    }

    fn advance_pronunciation(&mut self) -> Vec<Effect> {
        if self.screen != Screen::VocabGame2 {
            return Vec::new();
        }
        self.feedback = None;
        match self.vocab_targets.advance() {
            Some(_) => self.epoch += 1,
            None => self.award(Track::Vocab),
        }
        Vec::new()
    }

    fn award(&mut self, track: Track) {
        let route = self.coins.award(track);
        info!("💰 Coin awarded ({:?}), total {}", track, self.coins.count());
        let next = match route {
            RewardRoute::Menu => Screen::Menu,
            RewardRoute::VocabStory => Screen::VocabStory,
            RewardRoute::FinalStory => Screen::Story,
        };
        self.set_screen(next);
    }
}

fn non_empty_or(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
