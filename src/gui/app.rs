//! Main application state for the Kana Quest GUI
//!
//! Contains the KanaQuestApp struct and initialization logic.

use iced::Task;
use std::sync::Arc;
use tracing::info;

use crate::audio::{Recorder, SoundEngine};
use crate::canvas::DrawingSurface;
use crate::config::Config;
use crate::flow::Session;
use crate::tts::Speaker;
use crate::verify::VerificationClient;

use super::messages::Message;

/// Main application state
pub struct KanaQuestApp {
    /// Learning progress and the active screen
    pub(crate) session: Session,
    /// Handwriting board on the writing screen
    pub(crate) canvas: DrawingSurface,
    /// Blocking notice shown over the current screen
    pub(crate) notice: Option<String>,
    pub(crate) speaker: Speaker,
    pub(crate) verifier: VerificationClient,
    pub(crate) recorder: Recorder,
    /// Playback thread shared with the speaker
    pub(crate) sound_engine: SoundEngine,
    pub(crate) config: Config,
}

impl KanaQuestApp {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let sound_engine = SoundEngine::new()?;
        let recorder = Recorder::new(config.input_device)?;
        let speaker = Speaker::from_config(&config, Arc::new(sound_engine.clone()));
        let verifier = VerificationClient::from_config(&config);

        info!(
            "🎒 Kana Quest ready (judge: {}, speech: {:?})",
            if verifier.is_degraded() { "offline" } else { config.judge_model.as_str() },
            speaker
        );

        Ok(Self {
            session: Session::new(),
            canvas: DrawingSurface::new(),
            notice: None,
            speaker,
            verifier,
            recorder,
            sound_engine,
            config,
        })
    }

    /// Startup effects, such as warming the speech cache
    pub fn boot(&mut self) -> Task<Message> {
        if !self.config.preload_on_start {
            info!("⏭️ Startup preload disabled");
            return Task::none();
        }
        let effects = self.session.boot();
        self.run_effects(effects)
    }

    /// Window title
    pub fn title(&self) -> String {
        format!("日文一起學 - {}", self.session.screen())
    }

    /// Application theme
    pub fn theme(&self) -> iced::Theme {
        iced::Theme::Light
    }
}
