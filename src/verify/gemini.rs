//! Gemini-backed judge for handwriting and pronunciation

use async_trait::async_trait;
use tracing::debug;

use super::{AudioPayload, Judge, Verdict};
use crate::core::gemini::{
    extract_json, Content, GeminiClient, GenerateRequest, GenerateResponse, GenerationConfig, Part,
};
use crate::error::{KanaError, KanaResult};

#[derive(Debug)]
pub struct GeminiJudge {
    client: GeminiClient,
    model: String,
}

impl GeminiJudge {
    pub fn new(client: GeminiClient, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    async fn ask(&self, prompt: String, media: Part) -> KanaResult<Verdict> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt), media],
            }],
            generation_config: Some(GenerationConfig::verdict_json()),
        };
        let response = self.client.generate(&self.model, &request).await?;
        parse_verdict(&response)
    }
}

pub fn handwriting_prompt(glyph: &str) -> String {
    format!("Is this handwritten Japanese character '{glyph}'? Response JSON only.")
}

pub fn pronunciation_prompt(word: &str) -> String {
    format!(
        "Did the user correctly pronounce the Japanese word '{word}'? Analyze the audio and \
         respond with JSON (isCorrect: boolean, feedback: short encouragement in Traditional Chinese)."
    )
}

/// Pull the verdict object out of the model's text answer
pub fn parse_verdict(response: &GenerateResponse) -> KanaResult<Verdict> {
    let text = response
        .text()
        .ok_or_else(|| KanaError::Verify("judge returned no text".to_string()))?;
    debug!("⚖️ Judge raw answer: {}", text);

    let json = extract_json(&text)
        .ok_or_else(|| KanaError::Verify(format!("no JSON in judge answer: {text}")))?;
    Ok(serde_json::from_str(json)?)
}

#[async_trait]
impl Judge for GeminiJudge {
    async fn judge_handwriting(&self, png: &[u8], glyph: &str) -> KanaResult<Verdict> {
        self.ask(handwriting_prompt(glyph), Part::inline("image/png", png))
            .await
    }

    async fn judge_pronunciation(&self, audio: &AudioPayload, word: &str) -> KanaResult<Verdict> {
        self.ask(
            pronunciation_prompt(word),
            Part::inline(&audio.mime_type, &audio.bytes),
        )
        .await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> GenerateResponse {
        let body = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        });
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_parse_verdict() {
        let response = response_with_text(r#"{"isCorrect": false, "feedback": "再寫一次"}"#);
        assert_eq!(parse_verdict(&response).unwrap(), Verdict::fail("再寫一次"));
    }

    #[test]
    fn test_parse_verdict_with_fenced_json() {
        let response =
            response_with_text("```json\n{\"isCorrect\": true, \"feedback\": \"很好\"}\n```");
        assert_eq!(parse_verdict(&response).unwrap(), Verdict::pass("很好"));
    }

    #[test]
    fn test_parse_verdict_errors() {
        assert!(parse_verdict(&GenerateResponse::default()).is_err());
        assert!(parse_verdict(&response_with_text("I cannot tell")).is_err());
        assert!(parse_verdict(&response_with_text("{\"feedback\": 1}")).is_err());
    }

    #[test]
    fn test_prompts_name_the_target() {
        assert!(handwriting_prompt("お").contains("'お'"));
        assert!(pronunciation_prompt("バナナ").contains("'バナナ'"));
    }
}
