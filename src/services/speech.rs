use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use log::debug;

use crate::models::SpeechSettings;

/// Text-to-speech backend: `(text, language code)` in, MP3 bytes out.
pub trait SpeechSynthesizer: Send + Sync {
    fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}

/// Google Translate's public TTS endpoint. Requests are limited in length,
/// so text is split into word-aligned chunks and the MP3 frames concatenated.
pub struct GoogleTranslateTts {
    client: reqwest::blocking::Client,
    endpoint: String,
    chunk_chars: usize,
}

impl GoogleTranslateTts {
    pub fn new(settings: &SpeechSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("alibi/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            chunk_chars: settings.chunk_chars.max(1),
        })
    }
}

impl SpeechSynthesizer for GoogleTranslateTts {
    fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let language = language.trim();
        if language.is_empty() {
            bail!("language code is empty");
        }

        let mut audio = Vec::new();
        for (index, chunk) in split_for_speech(text, self.chunk_chars).iter().enumerate() {
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", language),
                    ("q", chunk.as_str()),
                ])
                .send()
                .with_context(|| format!("TTS request failed for chunk {index}"))?;

            let status = response.status();
            if !status.is_success() {
                return Err(anyhow!("TTS API error {status} (language '{language}')"));
            }
            let bytes = response.bytes().context("failed to read TTS response")?;
            debug!("[Speech] chunk {} -> {} bytes", index, bytes.len());
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            bail!("no audio returned");
        }
        Ok(audio)
    }
}

/// Split text into pieces of at most `max_chars` characters, preferring word
/// boundaries. Words longer than the limit are hard-split.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            chunks.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
