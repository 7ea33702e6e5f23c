//! Microphone recording using cpal
//!
//! The cpal stream is not `Send`, so a dedicated thread owns it and is
//! driven by start/stop commands. Stopping yields the take as WAV bytes.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::clip::encode_wav;
use crate::error::{KanaError, KanaResult};

enum RecorderCommand {
    Start(oneshot::Sender<KanaResult<()>>),
    Stop(oneshot::Sender<KanaResult<Vec<u8>>>),
}

/// A take in progress
struct Take {
    _stream: cpal::Stream,
    samples: Arc<Mutex<Vec<i16>>>,
    sample_rate: u32,
    channels: u16,
}

/// Thread-safe handle to the microphone recorder
#[derive(Clone)]
pub struct Recorder {
    sender: mpsc::Sender<RecorderCommand>,
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder").finish()
    }
}

impl Recorder {
    pub fn new(device_index: Option<usize>) -> anyhow::Result<Self> {
        let (sender, receiver) = mpsc::channel::<RecorderCommand>();

        thread::Builder::new()
            .name("kana-recorder".to_string())
            .spawn(move || Self::recorder_thread(receiver, device_index))?;

        Ok(Self { sender })
    }

    /// Open the microphone and start collecting samples
    pub async fn start(&self) -> KanaResult<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(RecorderCommand::Start(tx))
            .map_err(|e| KanaError::Recording(format!("Recorder thread disconnected: {}", e)))?;
        rx.await
            .map_err(|e| KanaError::Recording(format!("Recorder dropped reply: {}", e)))?
    }

    /// Close the microphone and return the take as WAV
    pub async fn stop(&self) -> KanaResult<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(RecorderCommand::Stop(tx))
            .map_err(|e| KanaError::Recording(format!("Recorder thread disconnected: {}", e)))?;
        rx.await
            .map_err(|e| KanaError::Recording(format!("Recorder dropped reply: {}", e)))?
    }

    fn recorder_thread(receiver: mpsc::Receiver<RecorderCommand>, device_index: Option<usize>) {
        let mut take: Option<Take> = None;

        while let Ok(cmd) = receiver.recv() {
            match cmd {
                RecorderCommand::Start(reply) => {
                    if take.is_some() {
                        debug!("🎙️ Already recording");
                        let _ = reply.send(Ok(()));
                        continue;
                    }
                    match open_take(device_index) {
                        Ok(t) => {
                            info!("🎙️ Recording started ({} Hz, {} ch)", t.sample_rate, t.channels);
                            take = Some(t);
                            let _ = reply.send(Ok(()));
                        }
                        Err(e) => {
                            warn!("🎙️ Could not open microphone: {}", e);
                            let _ = reply.send(Err(e));
                        }
                    }
                }
                RecorderCommand::Stop(reply) => {
                    let result = match take.take() {
                        Some(t) => finish_take(t),
                        None => Err(KanaError::Recording("not recording".to_string())),
                    };
                    let _ = reply.send(result);
                }
            }
        }

        debug!("🎙️ Recorder thread stopped");
    }
}

fn open_take(device_index: Option<usize>) -> KanaResult<Take> {
    let host = cpal::default_host();

    let device = match device_index {
        Some(idx) => host
            .input_devices()
            .map_err(|e| KanaError::Recording(e.to_string()))?
            .nth(idx)
            .ok_or_else(|| KanaError::Recording(format!("Device index {} out of range", idx)))?,
        None => host
            .default_input_device()
            .ok_or_else(|| KanaError::Recording("No default input device".to_string()))?,
    };

    let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
    debug!("🎙️ Using audio device: {}", device_name);

    let supported = device
        .default_input_config()
        .map_err(|e| KanaError::Recording(e.to_string()))?;
    let config: cpal::StreamConfig = supported.config();
    let samples = Arc::new(Mutex::new(Vec::<i16>::new()));

    let err_fn = |err: cpal::StreamError| warn!("Audio stream error: {}", err);

    let stream = match supported.sample_format() {
        cpal::SampleFormat::I16 => {
            let sink = samples.clone();
            device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buf) = sink.lock() {
                        buf.extend_from_slice(data);
                    }
                },
                err_fn,
                None,
            )
        }
        cpal::SampleFormat::F32 => {
            let sink = samples.clone();
            device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buf) = sink.lock() {
                        buf.extend(data.iter().map(|&s| f32_to_i16(s)));
                    }
                },
                err_fn,
                None,
            )
        }
        other => {
            return Err(KanaError::Recording(format!(
                "Unsupported sample format: {:?}",
                other
            )))
        }
    }
    .map_err(|e| KanaError::Recording(e.to_string()))?;

    stream
        .play()
        .map_err(|e| KanaError::Recording(e.to_string()))?;

    Ok(Take {
        _stream: stream,
        samples,
        sample_rate: config.sample_rate.0,
        channels: config.channels,
    })
}

fn finish_take(take: Take) -> KanaResult<Vec<u8>> {
    let Take {
        _stream,
        samples,
        sample_rate,
        channels,
    } = take;
    // Stop capturing before reading the buffer
    drop(_stream);

    let samples = samples.lock()?;
    info!(
        "🎙️ Recording stopped ({:.1}s)",
        samples.len() as f32 / (sample_rate as f32 * channels.max(1) as f32)
    );
    encode_wav(&samples, sample_rate, channels)
}

fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
