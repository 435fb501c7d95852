//! Speech synthesis through a local espeak-ng process.
//!
//! Voices are listed with `<command> --voices`; text is written to the
//! child's stdin. Each utterance is its own child process, and
//! [`EspeakSynthesizer::cancel`] kills every one still running.

use crate::domain::error::AppError;
use crate::domain::model::Voice;
use crate::domain::traits::SpeechSynthesizer;
use async_trait::async_trait;
use std::io::ErrorKind as IoErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, warn};

pub struct EspeakSynthesizer {
    command: String,
    // bumped on every cancel(); utterances watch it
    cancel_tx: watch::Sender<u64>,
}

impl EspeakSynthesizer {
    pub fn new(command: impl Into<String>) -> Self {
        let (cancel_tx, _) = watch::channel(0);
        Self {
            command: command.into(),
            cancel_tx,
        }
    }

    fn unavailable(&self, e: std::io::Error) -> AppError {
        if e.kind() == IoErrorKind::NotFound {
            AppError::SpeechUnavailable(format!("'{}' not found", self.command))
        } else {
            AppError::Speech(e.to_string())
        }
    }
}

impl Default for EspeakSynthesizer {
    fn default() -> Self {
        Self::new("espeak-ng")
    }
}

#[async_trait]
impl SpeechSynthesizer for EspeakSynthesizer {
    async fn voices(&self) -> Result<Vec<Voice>, AppError> {
        let output = Command::new(&self.command)
            .arg("--voices")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.unavailable(e))?;

        if !output.status.success() {
            return Err(AppError::Speech(format!(
                "'{} --voices' exited with {}",
                self.command, output.status
            )));
        }

        Ok(parse_voices(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn speak(&self, text: &str, lang: &str) -> Result<(), AppError> {
        // subscribe first so a cancel() during voice lookup is not lost
        let mut cancelled = self.cancel_tx.subscribe();

        let voices = self.voices().await?;
        if cancelled.has_changed().unwrap_or(false) {
            debug!("speech cancelled before playback");
            return Err(AppError::SpeechCancelled);
        }

        let voice = select_voice(&voices, lang)
            .map(|v| v.id.clone())
            .unwrap_or_else(|| lang.to_string());
        debug!(%lang, %voice, "speaking");

        let mut child = Command::new(&self.command)
            .args(["-v", voice.as_str(), "--stdin"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.unavailable(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let finished = tokio::select! {
            status = child.wait() => Some(status),
            _ = cancelled.changed() => None,
        };

        match finished {
            Some(status) => {
                let status = status?;
                if status.success() {
                    Ok(())
                } else {
                    warn!(%status, "speech playback failed");
                    Err(AppError::Speech(format!(
                        "{} exited with {}",
                        self.command, status
                    )))
                }
            }
            None => {
                child.kill().await.ok();
                debug!("speech cancelled");
                Err(AppError::SpeechCancelled)
            }
        }
    }

    fn cancel(&self) {
        self.cancel_tx.send_modify(|generation| *generation += 1);
    }
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  af              --/M      Afrikaans          gmw/af
///  5  cmn             --/M      Chinese_(Mandarin) sit/cmn              (zh-cmn 5)(zh 5)
/// ```
pub fn parse_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            let _priority = cols.next()?;
            let language = cols.next()?;
            let _age_gender = cols.next()?;
            let name = cols.next()?;
            let _file = cols.next();
            let other: Vec<&str> = cols.collect();
            Some(Voice {
                id: language.to_string(),
                name: name.replace('_', " "),
                language: language.to_string(),
                aliases: parse_aliases(&other.join(" ")),
            })
        })
        .collect()
}

// "(zh-cmn 5)(zh 5)" -> ["zh-cmn", "zh"]
fn parse_aliases(other: &str) -> Vec<String> {
    other
        .split(['(', ')'])
        .filter_map(|group| group.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase().replace('_', "-")
}

fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

fn voice_tags(voice: &Voice) -> impl Iterator<Item = String> + '_ {
    std::iter::once(&voice.language)
        .chain(voice.aliases.iter())
        .map(|tag| normalize_tag(tag))
}

/// Pick the voice for `lang`, in order of preference:
/// 1. a voice whose tag or alias equals `lang`
/// 2. one whose tag or alias equals the primary subtag (`zh-CN` finds the
///    voice listing `zh` as an alias)
/// 3. one whose own tag shares the primary subtag (`en` finds `en-gb`)
pub fn select_voice<'a>(voices: &'a [Voice], lang: &str) -> Option<&'a Voice> {
    let wanted = normalize_tag(lang);
    if wanted.is_empty() {
        return None;
    }

    if let Some(exact) = voices.iter().find(|v| voice_tags(v).any(|t| t == wanted)) {
        return Some(exact);
    }

    let wanted_primary = primary_subtag(&wanted);
    if let Some(primary) = voices
        .iter()
        .find(|v| voice_tags(v).any(|t| t == wanted_primary))
    {
        return Some(primary);
    }

    voices.iter().find(|v| {
        let tag = normalize_tag(&v.language);
        primary_subtag(&tag) == wanted_primary
    })
}
