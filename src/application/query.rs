use crate::application::languages;
use crate::domain::error::AppError;
use crate::domain::model::{TranslateRequest, TranslationResult};
use crate::state::AppState;
use tracing::{info, warn};

/// Translate `request` and, on a non-empty success, record it in history
/// when `record_history` is set and history is enabled.
///
/// Provider and transport failures come back inside the result; the
/// `Err` side is reserved for local storage failures.
pub async fn translate_text(
    state: &AppState,
    request: &TranslateRequest,
    record_history: bool,
) -> Result<TranslationResult, AppError> {
    if !languages::is_supported(&request.target_lang) {
        warn!(target = %request.target_lang, "target language is not in the catalog");
    }

    let result = state.translator.translate(request).await;

    if let Some(error) = &result.error {
        info!(kind = %error.kind, "translation failed: {}", error.message);
        return Ok(result);
    }

    let should_record = record_history && state.config.history.enable;
    if let Some(data) = result.data.as_ref().filter(|_| should_record) {
        if !data.translated_text.is_empty() {
            state
                .history
                .add(
                    &request.text,
                    &data.translated_text,
                    &request.source_lang,
                    &request.target_lang,
                )
                .await?;
        }
    }

    Ok(result)
}

/// Speak a finished translation in its target language
pub async fn speak_translation(
    state: &AppState,
    result: &TranslationResult,
    target_lang: &str,
) -> Result<(), AppError> {
    match result.data.as_ref() {
        Some(data) if !data.translated_text.trim().is_empty() => {
            state.speech.speak(&data.translated_text, target_lang).await
        }
        _ => Ok(()),
    }
}
