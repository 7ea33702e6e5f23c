//! Sound Engine for speech playback
//!
//! Uses a channel-based architecture to handle rodio's non-Send stream.
//! The engine spawns a dedicated audio thread that owns the playback infrastructure.

use std::sync::{mpsc, Arc};
use std::thread;
use tracing::{debug, error, info, warn};

use super::{AudioClip, ClipSink};
use crate::error::KanaError;

/// Commands sent to the audio thread
enum AudioCommand {
    PlayClip(Arc<AudioClip>),
    Stop,
}

/// Thread-safe handle to the sound engine
#[derive(Clone)]
pub struct SoundEngine {
    sender: mpsc::Sender<AudioCommand>,
}

impl std::fmt::Debug for SoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundEngine").finish()
    }
}

impl SoundEngine {
    pub fn new() -> anyhow::Result<Self> {
        let (sender, receiver) = mpsc::channel::<AudioCommand>();

        thread::Builder::new()
            .name("kana-audio".to_string())
            .spawn(move || {
                Self::audio_thread(receiver);
            })?;

        Ok(Self { sender })
    }

    fn audio_thread(receiver: mpsc::Receiver<AudioCommand>) {
        use rodio::OutputStream;

        // Initialize audio output on this thread
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(s) => s,
            Err(e) => {
                warn!("🔇 Failed to initialize audio output: {}", e);
                return;
            }
        };

        // Keep stream alive
        let _stream = stream;
        let mut sink = match rodio::Sink::try_new(&stream_handle) {
            Ok(s) => s,
            Err(e) => {
                error!("❌ Failed to create audio sink: {}", e);
                return;
            }
        };

        info!("🔊 Audio thread started");

        while let Ok(cmd) = receiver.recv() {
            match cmd {
                AudioCommand::PlayClip(clip) => {
                    debug!(
                        "🔊 Playing clip ({} samples @ {} Hz)",
                        clip.samples.len(),
                        clip.sample_rate
                    );
                    let source = rodio::buffer::SamplesBuffer::new(
                        clip.channels,
                        clip.sample_rate,
                        clip.samples.clone(),
                    );
                    sink.append(source);
                }
                AudioCommand::Stop => {
                    info!("🛑 Stopping all playback");
                    sink.stop();
                    // Re-create sink after stop as it becomes unusable if we want to play again
                    if let Ok(new_sink) = rodio::Sink::try_new(&stream_handle) {
                        sink = new_sink;
                    }
                }
            }
        }

        info!("🔇 Audio thread stopped");
    }

    /// Stop all current playback and clear queue
    pub fn stop(&self) -> anyhow::Result<()> {
        self.sender
            .send(AudioCommand::Stop)
            .map_err(|e| KanaError::Audio(format!("Audio thread disconnected: {}", e)).into())
    }
}

impl ClipSink for SoundEngine {
    fn play_clip(&self, clip: Arc<AudioClip>) -> anyhow::Result<()> {
        self.sender
            .send(AudioCommand::PlayClip(clip))
            .map_err(|e| KanaError::Audio(format!("Audio thread disconnected: {}", e)).into())
    }
}
