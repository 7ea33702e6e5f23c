//! Decoded audio buffers and WAV encoding

use std::io::Cursor;
use std::time::Duration;

use crate::error::{KanaError, KanaResult};

/// Sample rate of synthesized speech (16-bit little-endian mono PCM)
pub const TTS_SAMPLE_RATE: u32 = 24_000;

/// A decoded, playable buffer of interleaved 16-bit samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl AudioClip {
    /// Raw little-endian PCM. A trailing odd byte is dropped.
    pub fn from_pcm16_le(bytes: &[u8], sample_rate: u32, channels: u16) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self {
            sample_rate,
            channels,
            samples,
        }
    }

    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Encode interleaved samples as an in-memory 16-bit PCM WAV file
pub fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> KanaResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut buffer), spec)
            .map_err(|e| KanaError::Recording(format!("WAV header: {}", e)))?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| KanaError::Recording(format!("WAV write: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| KanaError::Recording(format!("WAV finalize: {}", e)))?;
    }
    Ok(buffer)
}
