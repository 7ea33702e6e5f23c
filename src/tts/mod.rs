//! TTS (Text-to-Speech) Module
//!
//! Remote synthesis is cached per text and voice. While a clip is missing
//! the on-device fallback engine speaks instead.

use crate::audio::AudioClip;
use crate::config::Config;
use crate::error::KanaResult;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub mod cache;
pub mod gemini;
pub mod speaker;
pub mod system;

pub use cache::{AudioCache, CacheKey};
pub use speaker::Speaker;

/// Trait for TTS engines that speak immediately
#[async_trait]
pub trait TtsEngine: Send + Sync + std::fmt::Debug {
    /// Speak the given text
    async fn speak(&self, text: &str) -> Result<()>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Trait for backends that turn text into a playable clip
#[async_trait]
pub trait Synthesizer: Send + Sync + std::fmt::Debug {
    /// `Ok(None)` when the backend answered without audio
    async fn synthesize(&self, text: &str, voice: &str) -> KanaResult<Option<AudioClip>>;

    fn name(&self) -> &str;
}

/// Factory for the configured fallback engine
pub fn create_fallback_engine(config: &Config) -> Arc<dyn TtsEngine> {
    let engine: Arc<dyn TtsEngine> = match config.fallback_tts_engine.as_str() {
        "system" => Arc::new(system::SystemEngine::new(
            &config.speech_language,
            config.speech_rate,
        )),
        "silent" | "none" => Arc::new(system::SilentEngine),
        other => {
            warn!("  - Unknown engine '{}', falling back to System", other);
            Arc::new(system::SystemEngine::new(
                &config.speech_language,
                config.speech_rate,
            ))
        }
    };
    info!("✅ Fallback TTS engine '{}' initialized", engine.name());
    engine
}
