use anyhow::Result;
use crate::error::{KanaError, KanaResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables checked (in order) for the judge credential
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Remote judge / synthesis
    pub api_key: String,
    pub api_base_url: String,
    pub judge_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub request_timeout_secs: u64,
    pub preload_pacing_ms: u64,

    // On-device speech fallback
    pub fallback_tts_engine: String,
    pub speech_language: String,
    pub speech_rate: f32,

    // Microphone
    pub input_device: Option<usize>,

    // Meta
    pub log_level: String,
    pub preload_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            judge_model: "gemini-3-flash-preview".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            tts_voice: "Kore".to_string(),
            request_timeout_secs: 20,
            preload_pacing_ms: 1000,
            fallback_tts_engine: "system".to_string(),
            speech_language: "ja".to_string(),
            speech_rate: 0.95,
            input_device: None,
            log_level: "INFO".to_string(),
            preload_on_start: true,
        }
    }
}

impl Config {
    /// Load config from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path())?;
        config.apply_env();
        Ok(config)
    }

    /// Load config from a specific file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Environment credentials win over the stored one
    pub fn apply_env(&mut self) {
        for var in API_KEY_ENV_VARS {
            if let Ok(value) = std::env::var(var) {
                if !value.trim().is_empty() {
                    self.api_key = value.trim().to_string();
                    return;
                }
            }
        }
    }

    /// Whether the remote judge and synthesizer can be reached at all
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Reject values that would break speech or the remote calls
    pub fn validate(&self) -> KanaResult<()> {
        if !(self.speech_rate > 0.0 && self.speech_rate <= 4.0) {
            return Err(KanaError::Config(format!(
                "speech_rate must be in (0, 4], got {}",
                self.speech_rate
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(KanaError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !self.api_base_url.starts_with("http") {
            return Err(KanaError::Config(format!(
                "api_base_url is not an HTTP URL: {}",
                self.api_base_url
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    pub fn preload_pacing(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.preload_pacing_ms)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kana-quest")
        .join("config.json")
}
