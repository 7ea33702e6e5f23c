//! On-device TTS fallback via speech-dispatcher or espeak-ng

use super::TtsEngine;
use crate::error::KanaError;
use anyhow::Result;
use async_trait::async_trait;
use std::process::Command;
use tracing::debug;

/// espeak-ng speaks this many words per minute at rate 1.0
const ESPEAK_BASE_WPM: f32 = 175.0;

#[derive(Debug, Clone)]
pub struct SystemEngine {
    language: String,
    rate: f32,
}

impl Default for SystemEngine {
    fn default() -> Self {
        Self::new("ja", 0.95)
    }
}

impl SystemEngine {
    pub fn new(language: &str, rate: f32) -> Self {
        Self {
            language: language.to_string(),
            rate,
        }
    }

    /// spd-say takes a rate in -100..=100 around a neutral 0
    pub fn spd_say_args(&self, text: &str) -> Vec<String> {
        let rate = ((self.rate - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32;
        vec![
            "-l".to_string(),
            self.language.clone(),
            "-r".to_string(),
            rate.to_string(),
            text.to_string(),
        ]
    }

    pub fn espeak_args(&self, text: &str) -> Vec<String> {
        let wpm = (ESPEAK_BASE_WPM * self.rate).round().max(80.0) as i32;
        vec![
            "-v".to_string(),
            self.language.clone(),
            "-s".to_string(),
            wpm.to_string(),
            text.to_string(),
        ]
    }
}

#[async_trait]
impl TtsEngine for SystemEngine {
    async fn speak(&self, text: &str) -> Result<()> {
        debug!("System speaking: {}", text);

        if Command::new("spd-say").args(self.spd_say_args(text)).spawn().is_ok() {
            return Ok(());
        }

        if Command::new("espeak-ng").args(self.espeak_args(text)).spawn().is_ok() {
            return Ok(());
        }

        Err(KanaError::Tts(
            "No system TTS command found (tried spd-say, espeak-ng)".to_string(),
        )
        .into())
    }

    fn name(&self) -> &str {
        "system"
    }
}

/// Engine that only logs, for machines without any speech output
#[derive(Debug, Default)]
pub struct SilentEngine;

#[async_trait]
impl TtsEngine for SilentEngine {
    async fn speak(&self, text: &str) -> Result<()> {
        debug!("🔇 (silent) {}", text);
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}
