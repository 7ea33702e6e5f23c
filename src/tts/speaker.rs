//! Speech playback that prefers cached synthesized clips

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::cache::{AudioCache, CacheKey};
use super::gemini::GeminiSynthesizer;
use super::{create_fallback_engine, Synthesizer, TtsEngine};
use crate::audio::{AudioClip, ClipSink};
use crate::config::Config;
use crate::core::gemini::GeminiClient;

struct SpeakerInner {
    cache: AudioCache,
    synth: Option<Arc<dyn Synthesizer>>,
    fallback: Arc<dyn TtsEngine>,
    player: Arc<dyn ClipSink>,
    voice: String,
    pacing: Duration,
}

/// Cheap to clone; all clones share one cache
#[derive(Clone)]
pub struct Speaker {
    inner: Arc<SpeakerInner>,
}

impl std::fmt::Debug for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Speaker")
            .field("voice", &self.inner.voice)
            .field("cached", &self.inner.cache.len())
            .field("fallback", &self.inner.fallback.name())
            .finish()
    }
}

impl Speaker {
    pub fn new(
        synth: Option<Arc<dyn Synthesizer>>,
        fallback: Arc<dyn TtsEngine>,
        player: Arc<dyn ClipSink>,
        voice: &str,
        pacing: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(SpeakerInner {
                cache: AudioCache::new(),
                synth,
                fallback,
                player,
                voice: voice.to_string(),
                pacing,
            }),
        }
    }

    /// Without a credential only the fallback engine is used
    pub fn from_config(config: &Config, player: Arc<dyn ClipSink>) -> Self {
        let synth = GeminiClient::from_config(config).map(|client| {
            info!("🗣️ Speech synthesis: Gemini ({}, voice {})", config.tts_model, config.tts_voice);
            Arc::new(GeminiSynthesizer::new(client, &config.tts_model)) as Arc<dyn Synthesizer>
        });
        Self::new(
            synth,
            create_fallback_engine(config),
            player,
            &config.tts_voice,
            config.preload_pacing(),
        )
    }

    fn key(&self, text: &str) -> CacheKey {
        CacheKey::new(text, &self.inner.voice)
    }

    pub fn cached(&self, text: &str) -> Option<Arc<AudioClip>> {
        self.inner.cache.get(&self.key(text))
    }

    pub fn is_pending(&self, text: &str) -> bool {
        self.inner.cache.is_pending(&self.key(text))
    }

    /// Play `text` now. A cache miss speaks through the fallback engine and
    /// warms the cache in the background for next time.
    pub async fn speak(&self, text: &str) {
        if text.is_empty() {
            return;
        }

        if let Some(clip) = self.cached(text) {
            debug!("🔊 Cache hit for '{}'", text);
            if let Err(e) = self.inner.player.play_clip(clip) {
                warn!("🔇 Playback failed, using fallback: {}", e);
                self.speak_fallback(text).await;
            }
            return;
        }

        self.spawn_fetch(text);
        self.speak_fallback(text).await;
    }

    async fn speak_fallback(&self, text: &str) {
        if let Err(e) = self.inner.fallback.speak(text).await {
            warn!("🔇 Fallback TTS '{}' failed: {}", self.inner.fallback.name(), e);
        }
    }

    /// Reserve the key and start a background fetch. False when nothing
    /// was started.
    fn spawn_fetch(&self, text: &str) -> bool {
        if self.inner.synth.is_none() {
            return false;
        }
        let key = self.key(text);
        if !self.inner.cache.try_begin(&key) {
            return false;
        }
        let speaker = self.clone();
        tokio::spawn(async move {
            speaker.complete_fetch(key).await;
        });
        true
    }

    async fn complete_fetch(&self, key: CacheKey) -> Option<Arc<AudioClip>> {
        let clip = match &self.inner.synth {
            Some(synth) => match synth.synthesize(&key.text, &key.voice).await {
                Ok(clip) => clip,
                Err(e) => {
                    warn!("🗣️ Synthesis of '{}' failed: {}", key.text, e);
                    None
                }
            },
            None => None,
        };
        let stored = self.inner.cache.finish(&key, clip);
        if stored.is_some() {
            debug!("🗣️ Cached '{}'", key);
        }
        stored
    }

    /// Cache-or-None. Never fails; a failed synthesis leaves the entry
    /// absent so a later call can retry.
    pub async fn fetch(&self, text: &str) -> Option<Arc<AudioClip>> {
        if let Some(clip) = self.cached(text) {
            return Some(clip);
        }
        self.inner.synth.as_ref()?;
        let key = self.key(text);
        if !self.inner.cache.try_begin(&key) {
            // Another request owns it
            return None;
        }
        self.complete_fetch(key).await
    }

    /// Request every text one after another, pausing between requests
    pub async fn preload(&self, texts: &[String]) {
        if self.inner.synth.is_none() {
            debug!("🗣️ No synthesizer, skipping preload");
            return;
        }
        info!("🗣️ Preloading {} phrases", texts.len());
        for text in texts {
            if self.spawn_fetch(text) {
                tokio::time::sleep(self.inner.pacing).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::system::SilentEngine;

    #[derive(Debug, Default)]
    struct NullSink;

    impl ClipSink for NullSink {
        fn play_clip(&self, _clip: Arc<AudioClip>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_without_synth_nothing_is_cached() {
        let speaker = Speaker::new(
            None,
            Arc::new(SilentEngine),
            Arc::new(NullSink),
            "Kore",
            Duration::from_millis(1),
        );
        speaker.speak("あ").await;
        speaker.preload(&["い".to_string()]).await;
        assert!(speaker.fetch("あ").await.is_none());
        assert!(speaker.cached("い").is_none());
        assert!(!speaker.is_pending("あ"));
    }
}
