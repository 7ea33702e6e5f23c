//! Audio playback and microphone capture

use std::sync::Arc;

pub mod capture;
pub mod clip;
pub mod engine;

pub use capture::Recorder;
pub use clip::{encode_wav, AudioClip, TTS_SAMPLE_RATE};
pub use engine::SoundEngine;

/// Anything that can play a decoded clip without blocking the caller
pub trait ClipSink: Send + Sync {
    fn play_clip(&self, clip: Arc<AudioClip>) -> anyhow::Result<()>;
}
