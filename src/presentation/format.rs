use crate::application::languages;
use crate::domain::model::{HistoryItem, LanguageOption, TranslateRequest, TranslationResult};
use crate::presentation::theme::Theme;
use chrono::Local;
use std::fmt::Write;

const CUTOFF_WIDTH: usize = 40;

/// Render one translation outcome for the terminal
pub fn format_translation(
    request: &TranslateRequest,
    result: &TranslationResult,
    theme: &Theme,
    enable_emoji: bool,
) -> String {
    let mut output = String::new();

    let pair = format!(
        "[{} → {}]",
        languages::display_name(&request.source_lang),
        languages::display_name(&request.target_lang)
    );
    let indicator = if enable_emoji {
        format!("🌐 {}", pair)
    } else {
        pair
    };
    writeln!(output, "{} {}", (theme.title)(request.text.trim()), (theme.lang)(&indicator)).ok();

    if let Some(error) = &result.error {
        let prefix = if enable_emoji { "✘ " } else { "" };
        writeln!(
            output,
            "  {}",
            (theme.error)(&format!("{}[{}] {}", prefix, error.kind, error.message))
        )
        .ok();
        return output;
    }

    if let Some(data) = &result.data {
        writeln!(output).ok();
        if data.translated_text.is_empty() {
            writeln!(output, "  {}", (theme.meta)("(nothing to translate)")).ok();
        } else {
            writeln!(output, "  {}", (theme.para)(&data.translated_text)).ok();
        }
        if let Some(confidence) = data.confidence {
            writeln!(
                output,
                "  {}",
                (theme.meta)(&format!("match {:.0}%", confidence * 100.0))
            )
            .ok();
        }
    }

    writeln!(output).ok();
    output
}

pub fn format_languages(options: &[LanguageOption], theme: &Theme) -> String {
    let mut output = String::new();
    for option in options {
        let native = option
            .native_name
            .map(|n| format!(" {}", (theme.addi)(n)))
            .unwrap_or_default();
        writeln!(
            output,
            "  {} {}{}",
            (theme.idx)(&format!("{:<6}", option.code)),
            option.name,
            native
        )
        .ok();
    }
    output
}

pub fn format_history(items: &[HistoryItem], theme: &Theme) -> String {
    let mut output = String::new();

    if items.is_empty() {
        writeln!(output, "  {}", (theme.meta)("History is empty")).ok();
        return output;
    }

    let cutoff = "⸺".repeat(CUTOFF_WIDTH);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(output, "  {}", (theme.line)(&cutoff)).ok();
        }
        let when = item.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        writeln!(
            output,
            "  {} {} {}",
            (theme.idx)(&item.id.to_string()),
            (theme.lang)(&format!("{}|{}", item.source_lang, item.target_lang)),
            (theme.meta)(&when.to_string())
        )
        .ok();
        writeln!(output, "    {}", (theme.title)(&item.original_text)).ok();
        writeln!(output, "    {}", (theme.para)(&item.translated_text)).ok();
    }

    output
}

