use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// 翻译请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslateRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    /// `source|target`, as the provider expects it
    pub fn langpair(&self) -> String {
        format!("{}|{}", self.source_lang, self.target_lang)
    }
}

/// Uniform outcome of a translation call.
///
/// Serializes as `{ "success": bool, "data"?: {...}, "error"?: {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Translation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TranslationFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
    pub detected_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationFailure {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
}

// 错误类别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Http,
    Api,
    Data,
    Network,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Http => "http",
            ErrorKind::Api => "api",
            ErrorKind::Data => "data",
            ErrorKind::Network => "network",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TranslationResult {
    pub fn ok(translation: Translation) -> Self {
        Self {
            success: true,
            data: Some(translation),
            error: None,
        }
    }

    pub fn fail(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(TranslationFailure {
                kind,
                message: message.into(),
            }),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    pub fn into_result(self) -> Result<Translation, TranslationFailure> {
        match (self.data, self.error) {
            (Some(data), None) if self.success => Ok(data),
            (_, Some(error)) => Err(error),
            _ => Err(TranslationFailure {
                kind: ErrorKind::Unknown,
                message: "Translation result carried no data".to_string(),
            }),
        }
    }
}

// 语言选项 (静态)
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_name: Option<&'static str>,
}

// 历史记录条目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: i64, // 创建时间 (Unix 毫秒)
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryItem {
    /// Two items with the same key are the same translation.
    pub fn same_key(&self, other: &HistoryItem) -> bool {
        self.original_text == other.original_text
            && self.source_lang == other.source_lang
            && self.target_lang == other.target_lang
    }
}

/// A voice offered by a speech backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
    #[serde(default)]
    pub aliases: Vec<String>, // 其他语言标签
}
