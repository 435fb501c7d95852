use crate::domain::model::LanguageOption;

static LANGUAGES: [LanguageOption; 9] = [
    lang("hi", "Hindi", "हिन्दी"),
    lang("es", "Spanish", "Español"),
    lang("fr", "French", "Français"),
    lang("de", "German", "Deutsch"),
    lang("zh-CN", "Chinese (Simplified)", "简体中文"),
    lang("ar", "Arabic", "العربية"),
    lang("ru", "Russian", "Русский"),
    lang("ja", "Japanese", "日本語"),
    lang("ko", "Korean", "한국어"),
];

const fn lang(code: &'static str, name: &'static str, native: &'static str) -> LanguageOption {
    LanguageOption {
        code,
        name,
        native_name: Some(native),
    }
}

/// Supported target languages, in display order
pub fn language_options() -> &'static [LanguageOption] {
    &LANGUAGES
}

/// Look up a language by code, ignoring case (`zh-cn` finds `zh-CN`)
pub fn find_language(code: &str) -> Option<&'static LanguageOption> {
    let code = code.trim();
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

pub fn is_supported(code: &str) -> bool {
    find_language(code).is_some()
}

/// Display name for a code, falling back to the code itself
pub fn display_name(code: &str) -> String {
    find_language(code)
        .map(|l| l.name.to_string())
        .unwrap_or_else(|| code.to_string())
}
