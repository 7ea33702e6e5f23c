//! Remote speech synthesis through Gemini's audio output

use async_trait::async_trait;
use tracing::debug;

use super::Synthesizer;
use crate::audio::{AudioClip, TTS_SAMPLE_RATE};
use crate::core::gemini::{Content, GeminiClient, GenerateRequest, GenerationConfig, Part};
use crate::error::KanaResult;

#[derive(Debug)]
pub struct GeminiSynthesizer {
    client: GeminiClient,
    model: String,
}

impl GeminiSynthesizer {
    pub fn new(client: GeminiClient, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }
}

pub fn speech_request(text: &str, voice: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part::text(format!("Say '{text}' clearly."))],
        }],
        generation_config: Some(GenerationConfig::speech(voice)),
    }
}

#[async_trait]
impl Synthesizer for GeminiSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> KanaResult<Option<AudioClip>> {
        let response = self
            .client
            .generate(&self.model, &speech_request(text, voice))
            .await?;

        let Some(pcm) = response.inline_bytes()? else {
            debug!("🗣️ No audio returned for '{}'", text);
            return Ok(None);
        };
        Ok(Some(AudioClip::from_pcm16_le(&pcm, TTS_SAMPLE_RATE, 1)))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
