//! Kana Quest Error Types
//!
//! Centralized error handling for the learning app and its collaborators.

use thiserror::Error;

/// Central error type for Kana Quest
#[derive(Error, Debug)]
pub enum KanaError {
    #[error("TTS error: {0}")]
    Tts(String),

    #[error("Audio playback error: {0}")]
    Audio(String),

    #[error("Recording error: {0}")]
    Recording(String),

    #[error("Verification error: {0}")]
    Verify(String),

    #[error("Remote API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Kana Quest operations
pub type KanaResult<T> = Result<T, KanaError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for KanaError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        KanaError::Lock(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanaError::Verify("judge offline".to_string());
        assert_eq!(err.to_string(), "Verification error: judge offline");
    }

    #[test]
    fn test_engine_errors_survive_anyhow() {
        let err: anyhow::Error = KanaError::Audio("Audio thread disconnected".to_string()).into();
        assert!(matches!(err.downcast_ref::<KanaError>(), Some(KanaError::Audio(_))));
        assert_eq!(err.to_string(), "Audio playback error: Audio thread disconnected");
    }

    #[test]
    fn test_poison_conversion() {
        let lock = std::sync::Arc::new(std::sync::Mutex::new(0));
        let cloned = lock.clone();
        let _ = std::thread::spawn(move || {
            let _guard = cloned.lock().unwrap();
            panic!("poison");
        })
        .join();

        let err: KanaError = lock.lock().unwrap_err().into();
        assert!(matches!(err, KanaError::Lock(_)));
    }
}
