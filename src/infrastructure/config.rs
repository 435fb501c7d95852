use crate::domain::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "langbridge";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    pub http_proxy: Option<String>,
    #[serde(default = "default_enable_emoji")]
    pub enable_emoji: bool,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslateConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_min_request_delay_ms")]
    pub min_request_delay_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_enable")]
    pub enable: bool,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_command")]
    pub command: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            min_request_delay_ms: default_min_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enable: true,
            max_items: default_max_items(),
            storage_key: default_storage_key(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: default_speech_command(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            http_proxy: None,
            enable_emoji: true,
            logging: Logging::default(),
            translate: TranslateConfig::default(),
            history: HistoryConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

// Defaults
fn default_theme() -> String {
    "temp".to_string()
}
fn default_enable_emoji() -> bool {
    true
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_endpoint() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}
fn default_source_lang() -> String {
    "en".to_string()
}
fn default_target_lang() -> String {
    "hi".to_string()
}
fn default_min_request_delay_ms() -> u64 {
    1000
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_items() -> usize {
    20
}
fn default_storage_key() -> String {
    "translation_history".to_string()
}
fn default_speech_command() -> String {
    "espeak-ng".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
}

/// Get database path (uses config directory by default)
pub fn get_database_path() -> PathBuf {
    // ~/.config/langbridge/langbridge.db (Linux)
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("langbridge.db")
}

/// Parse a config document; missing fields take their defaults.
pub fn parse_config(content: &str) -> Result<Config, AppError> {
    Ok(toml::from_str::<Config>(content)?)
}

pub fn load_config() -> Result<Config, AppError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), AppError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(AppError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
