//! Google Translate text-to-speech.
//!
//! The endpoint rejects long inputs, so text is cut into chunks of at most
//! [`MAX_CHUNK_CHARS`] characters at word boundaries. Each chunk comes back as
//! a standalone MP3 stream and the streams are concatenated in order.

use async_trait::async_trait;
use vaani_types::Language;

use crate::error::SpeechError;
use crate::provider::SpeechSynthesizer;

pub const DEFAULT_URL: &str = "https://translate.google.com/translate_tts";
pub const MAX_CHUNK_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleTtsSettings {
    pub url: String,
}

impl Default for GoogleTtsSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleTts {
    client: reqwest::Client,
    settings: GoogleTtsSettings,
}

impl GoogleTts {
    pub fn new(settings: GoogleTtsSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    pub fn with_client(client: reqwest::Client, settings: GoogleTtsSettings) -> Self {
        Self { client, settings }
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: Language,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SpeechError> {
        let query = [
            ("ie", "UTF-8".to_string()),
            ("client", "tw-ob".to_string()),
            ("q", chunk.to_string()),
            ("tl", language.code().to_string()),
            ("total", total.to_string()),
            ("idx", idx.to_string()),
            ("textlen", chunk.chars().count().to_string()),
        ];

        let response = self
            .client
            .get(&self.settings.url)
            .query(&query)
            .send()
            .await?;

        if let Some(err) = SpeechError::from_status(response.status()) {
            return Err(err);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Breaks between words where possible. A single word longer than the limit
/// is cut into fixed-size pieces.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SpeechError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        tracing::debug!(
            language = language.code(),
            chunks = chunks.len(),
            "synthesizing speech"
        );

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, chunks.len()).await?;
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(SpeechError::api("Empty audio in response"));
        }

        Ok(audio)
    }

    fn name(&self) -> &str {
        "google-tts"
    }
}
