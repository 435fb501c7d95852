use crate::domain::error::AppError;
use crate::domain::model::{TranslateRequest, TranslationResult, Voice};
use async_trait::async_trait;

/// Trait for translation services
///
/// Implementations never fail past this boundary: every outcome,
/// including transport failures, comes back as a [`TranslationResult`].
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> TranslationResult;
}

/// Trait for key/value blob storage
///
/// Values are opaque strings. Writers are not coordinated; the last
/// write to a key wins.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Trait for speech synthesis backends
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Voices installed on this machine
    async fn voices(&self) -> Result<Vec<Voice>, AppError>;

    /// Speak `text` in `lang`, completing when playback ends
    async fn speak(&self, text: &str, lang: &str) -> Result<(), AppError>;

    /// Abort every utterance currently playing
    fn cancel(&self);
}
