//! GUI module using iced
//!
//! The window is a thin shell around the session state machine: messages
//! become session events, and the effects the session returns become tasks.

use std::time::Duration;

use iced::widget::{center, column, container, opaque, stack};
use iced::{Color, Element, Length, Task};
use tracing::{debug, warn};

use crate::canvas::SubmitError;
use crate::flow::{Effect, Event, Screen, TimerTicket};
use crate::tts::Speaker;
use crate::verify::AudioPayload;

// Sub-modules
pub mod app;
pub mod board;
pub mod messages;
pub mod screens;

// Re-exports for convenience
pub use app::KanaQuestApp;
pub use messages::{Message, StrokeInput};

pub async fn msg_speak(speaker: Speaker, text: String) -> Message {
    speaker.speak(&text).await;
    Message::SpeechFinished
}

pub async fn timer_task(ticket: TimerTicket, delay: Duration) -> Message {
    tokio::time::sleep(delay).await;
    Message::Event(Event::TimerFired(ticket))
}

impl KanaQuestApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Event(event) => return self.dispatch(event),
            Message::Stroke(input) => {
                if self.session.screen() != Screen::Game2 {
                    return Task::none();
                }
                match input {
                    StrokeInput::Begin(p) => self.canvas.begin_stroke(p),
                    StrokeInput::Extend(p) => self.canvas.extend_stroke(p),
                    StrokeInput::End => self.canvas.end_stroke(),
                }
            }
            Message::ClearDrawing => {
                if self.canvas.is_locked() {
                    return Task::none();
                }
                self.canvas.clear();
                return self.dispatch(Event::DrawingCleared);
            }
            Message::SubmitDrawing => match self.canvas.submit() {
                Ok(png) => return self.dispatch(Event::DrawingSubmitted(png)),
                Err(SubmitError::Empty) => return self.dispatch(Event::DrawingRejected),
                Err(SubmitError::Locked) => {
                    debug!("✏️ Submit ignored while verifying");
                }
                Err(e) => {
                    warn!("✏️ Could not export drawing: {}", e);
                    return self.dispatch(Event::HandwritingJudged {
                        attempt: self.session.attempt(),
                        result: Err(e.to_string()),
                    });
                }
            },
            Message::DismissNotice => {
                self.notice = None;
            }
            Message::SpeechFinished | Message::None => {}
        }
        Task::none()
    }

    /// Feed one event to the session and carry out what it asks for
    fn dispatch(&mut self, event: Event) -> Task<Message> {
        if event == Event::GoHome {
            // Cut off anything still talking
            if let Err(e) = self.sound_engine.stop() {
                warn!("🔇 {}", e);
            }
        }
        let effects = self.session.update(event);
        self.canvas
            .set_locked(self.session.is_verifying() || self.session.awaiting_advance());
        self.run_effects(effects)
    }

    pub(crate) fn run_effects(&mut self, effects: Vec<Effect>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = effects
            .into_iter()
            .map(|effect| self.run_effect(effect))
            .collect();
        Task::batch(tasks)
    }

    fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::Speak(text) => Task::perform(msg_speak(self.speaker.clone(), text), |m| m),
            Effect::Preload(texts) => {
                let speaker = self.speaker.clone();
                Task::perform(async move { speaker.preload(&texts).await }, |_| {
                    Message::None
                })
            }
            Effect::Schedule { ticket, delay } => Task::perform(timer_task(ticket, delay), |m| m),
            Effect::VerifyHandwriting {
                attempt,
                image,
                glyph,
            } => {
                let verifier = self.verifier.clone();
                Task::perform(
                    async move {
                        verifier
                            .verify_handwriting(&image, &glyph)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    move |result| Message::Event(Event::HandwritingJudged { attempt, result }),
                )
            }
            Effect::VerifyPronunciation {
                attempt,
                audio,
                word,
            } => {
                let verifier = self.verifier.clone();
                Task::perform(
                    async move {
                        verifier
                            .verify_pronunciation(&AudioPayload::wav(audio), &word)
                            .await
                    },
                    move |verdict| Message::Event(Event::PronunciationJudged { attempt, verdict }),
                )
            }
            Effect::StartRecording => {
                let recorder = self.recorder.clone();
                Task::perform(async move { recorder.start().await }, |result| match result {
                    Ok(()) => Message::None,
                    Err(e) => Message::Event(Event::RecordingFailed(e.to_string())),
                })
            }
            Effect::StopRecording => {
                let recorder = self.recorder.clone();
                Task::perform(async move { recorder.stop().await }, |result| match result {
                    Ok(wav) => Message::Event(Event::RecordingFinished(wav)),
                    Err(e) => Message::Event(Event::RecordingLost(e.to_string())),
                })
            }
            Effect::Notice(text) => {
                self.notice = Some(text);
                Task::none()
            }
            Effect::ResetCanvas => {
                self.canvas.clear();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let screen = self.session.screen();
        let content = match screen {
            Screen::Home => screens::home::view(self),
            Screen::Instructions => screens::home::instructions(self),
            Screen::Menu => screens::menu::view(self),
            Screen::VocabMenu => screens::menu::vocab(self),
            Screen::Learning => screens::learning::hiragana(self),
            Screen::VocabLearning => screens::learning::vocab(self),
            Screen::Game1 => screens::games::listen_hiragana(self),
            Screen::VocabGame1 => screens::games::listen_vocab(self),
            Screen::Game2 => screens::writing::view(self),
            Screen::VocabGame2 => screens::games::speak_vocab(self),
            Screen::Story => screens::story::final_story(self),
            Screen::VocabStory => screens::story::vocab_story(self),
        };

        let body = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .padding(20);

        let page: Element<'_, Message> = if screen.shows_header() {
            column![screens::header::view(self), body].into()
        } else {
            body.into()
        };

        match &self.notice {
            Some(text) => stack![
                page,
                opaque(center(screens::notice(text)).style(|_theme| container::Style {
                    background: Some(
                        Color {
                            a: 0.5,
                            ..Color::BLACK
                        }
                        .into()
                    ),
                    ..container::Style::default()
                }))
            ]
            .into(),
            None => page,
        }
    }
}
