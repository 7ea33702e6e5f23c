//! Skill verification
//!
//! Sends a drawing or a recorded utterance to an external judge and gets a
//! [`Verdict`] back. Without a credential the client runs in a degraded
//! mode that always passes, so the learning flow is never blocked.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::core::gemini::GeminiClient;
use crate::error::KanaResult;

pub mod gemini;

/// Feedback when handwriting is accepted without a configured judge
pub const NO_KEY_HANDWRITING_FEEDBACK: &str = "API Key 缺失";
/// Feedback when pronunciation is accepted without a configured judge
pub const NO_KEY_PRONUNCIATION_FEEDBACK: &str = "沒問題！";
/// Encouragement when the pronunciation judge could not be reached
pub const PRONUNCIATION_FALLBACK_FEEDBACK: &str = "聽起來很棒！";

/// Judge result. Wire shape: `{"isCorrect": bool, "feedback": string}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_correct: bool,
    #[serde(default)]
    pub feedback: String,
}

impl Verdict {
    pub fn pass(feedback: impl Into<String>) -> Self {
        Self {
            is_correct: true,
            feedback: feedback.into(),
        }
    }

    pub fn fail(feedback: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            feedback: feedback.into(),
        }
    }
}

/// Recorded utterance handed to the pronunciation judge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AudioPayload {
    pub fn wav(bytes: Vec<u8>) -> Self {
        Self {
            mime_type: "audio/wav".to_string(),
            bytes,
        }
    }
}

/// Trait for external judges
#[async_trait]
pub trait Judge: Send + Sync + std::fmt::Debug {
    /// Is `png` a drawing of `glyph`?
    async fn judge_handwriting(&self, png: &[u8], glyph: &str) -> KanaResult<Verdict>;

    /// Does `audio` pronounce `word`?
    async fn judge_pronunciation(&self, audio: &AudioPayload, word: &str) -> KanaResult<Verdict>;

    /// Get the judge name
    fn name(&self) -> &str;
}

/// Applies the degraded-mode and fallback policy on top of a judge
#[derive(Clone, Debug, Default)]
pub struct VerificationClient {
    judge: Option<Arc<dyn Judge>>,
}

impl VerificationClient {
    pub fn new(judge: Option<Arc<dyn Judge>>) -> Self {
        Self { judge }
    }

    /// Gemini judge when a credential is configured, degraded mode otherwise
    pub fn from_config(config: &Config) -> Self {
        match GeminiClient::from_config(config) {
            Some(client) => {
                info!("⚖️ Verification judge: Gemini ({})", config.judge_model);
                Self::new(Some(Arc::new(gemini::GeminiJudge::new(
                    client,
                    &config.judge_model,
                ))))
            }
            None => {
                warn!("⚠️ No API key configured, verification always passes");
                Self::new(None)
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.judge.is_none()
    }

    /// Transport and parse failures are returned to the caller, which
    /// shows a retryable error
    pub async fn verify_handwriting(&self, png: &[u8], glyph: &str) -> KanaResult<Verdict> {
        let Some(judge) = &self.judge else {
            return Ok(Verdict::pass(NO_KEY_HANDWRITING_FEEDBACK));
        };
        let verdict = judge.judge_handwriting(png, glyph).await?;
        info!(
            "✏️ {} judged '{}': correct={}",
            judge.name(),
            glyph,
            verdict.is_correct
        );
        Ok(verdict)
    }

    /// Never fails: any judge error becomes an encouraging pass
    pub async fn verify_pronunciation(&self, audio: &AudioPayload, word: &str) -> Verdict {
        let Some(judge) = &self.judge else {
            return Verdict::pass(NO_KEY_PRONUNCIATION_FEEDBACK);
        };
        match judge.judge_pronunciation(audio, word).await {
            Ok(verdict) => {
                info!(
                    "🎙️ {} judged '{}': correct={}",
                    judge.name(),
                    word,
                    verdict.is_correct
                );
                verdict
            }
            Err(e) => {
                error!("❌ Pronunciation verification failed: {}", e);
                Verdict::pass(PRONUNCIATION_FALLBACK_FEEDBACK)
            }
        }
    }
}
