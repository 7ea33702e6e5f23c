//! Scripted synthesizer, judge and playback sink

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use kana_quest::audio::{AudioClip, ClipSink};
use kana_quest::error::{KanaError, KanaResult};
use kana_quest::tts::Synthesizer;
use kana_quest::verify::{AudioPayload, Judge, Verdict};

/// Synthesizer that returns a short silent clip after `latency`
#[derive(Debug, Clone, Default)]
pub struct MockSynth {
    pub calls: Arc<Mutex<Vec<(String, Instant)>>>,
    pub latency: Duration,
    /// Texts that fail with an API error
    pub failing: Arc<Mutex<Vec<String>>>,
}

impl MockSynth {
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn fail_on(&self, text: &str) {
        self.failing.lock().unwrap().push(text.to_string());
    }

    pub fn requested(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl Synthesizer for MockSynth {
    async fn synthesize(&self, text: &str, _voice: &str) -> KanaResult<Option<AudioClip>> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), Instant::now()));
        tokio::time::sleep(self.latency).await;
        if self.failing.lock().unwrap().iter().any(|t| t == text) {
            return Err(KanaError::Api {
                status: 429,
                body: "rate limited".to_string(),
            });
        }
        Ok(Some(AudioClip::from_pcm16_le(&[0u8; 96], 24_000, 1)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Counts clips instead of playing them
#[derive(Debug, Default)]
pub struct CountingSink {
    pub played: AtomicUsize,
}

impl CountingSink {
    pub fn count(&self) -> usize {
        self.played.load(Ordering::SeqCst)
    }
}

impl ClipSink for CountingSink {
    fn play_clip(&self, _clip: Arc<AudioClip>) -> anyhow::Result<()> {
        self.played.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Judge with a fixed answer, or a transport failure
#[derive(Debug)]
pub struct ScriptedJudge {
    pub verdict: Option<Verdict>,
    pub calls: AtomicUsize,
}

impl ScriptedJudge {
    pub fn answering(verdict: Verdict) -> Self {
        Self {
            verdict: Some(verdict),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            verdict: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn answer(&self) -> KanaResult<Verdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.verdict
            .clone()
            .ok_or_else(|| KanaError::Verify("connection refused".to_string()))
    }
}

#[async_trait]
impl Judge for ScriptedJudge {
    async fn judge_handwriting(&self, _png: &[u8], _glyph: &str) -> KanaResult<Verdict> {
        self.answer()
    }

    async fn judge_pronunciation(&self, _audio: &AudioPayload, _word: &str) -> KanaResult<Verdict> {
        self.answer()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
