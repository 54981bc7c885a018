use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use vaani_types::Language;

use crate::error::SpeechError;
use crate::provider::SpeechToText;

pub const DEFAULT_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
pub const DEFAULT_MODEL: &str = "whisper-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhisperSettings {
    /// Any endpoint speaking the OpenAI transcription protocol
    pub url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for WhisperSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Clone)]
pub struct WhisperClient {
    client: reqwest::Client,
    settings: WhisperSettings,
}

impl WhisperClient {
    pub fn new(settings: WhisperSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    pub fn with_client(client: reqwest::Client, settings: WhisperSettings) -> Self {
        Self { client, settings }
    }

    fn form(&self, audio: &[u8], language: Language) -> Form {
        let file = Part::bytes(audio.to_vec()).file_name("audio.wav");
        Form::new()
            .part("file", file)
            .text("model", self.settings.model.clone())
            .text("language", language.code())
    }
}

pub(crate) fn parse_transcription(body: &str) -> Result<String, SpeechError> {
    let response: TranscriptionResponse = serde_json::from_str(body)
        .map_err(|e| SpeechError::api(format!("Failed to parse response: {}", e)))?;
    Ok(response.text.trim().to_string())
}

#[async_trait]
impl SpeechToText for WhisperClient {
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<String, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        tracing::debug!(
            bytes = audio.len(),
            language = language.code(),
            model = %self.settings.model,
            "transcribing audio"
        );

        let mut request = self
            .client
            .post(&self.settings.url)
            .multipart(self.form(audio, language));
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if let Some(err) = SpeechError::from_status(response.status()) {
            return Err(err);
        }

        let body = response.text().await?;
        parse_transcription(&body)
    }

    fn name(&self) -> &str {
        "whisper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_is_trimmed() {
        let text = parse_transcription(r#"{"text": "  Good morning. "}"#).unwrap();
        assert_eq!(text, "Good morning.");
    }

    #[test]
    fn test_malformed_response() {
        let err = parse_transcription(r#"{"error": "bad audio"}"#).unwrap_err();
        assert!(err.to_string().starts_with("API error: Failed to parse response"));
    }

    #[tokio::test]
    async fn test_empty_audio_is_rejected_before_request() {
        // Unroutable URL: reaching the network would fail with a different error
        let client = WhisperClient::new(WhisperSettings {
            url: "http://127.0.0.1:9/".to_string(),
            ..WhisperSettings::default()
        });
        let err = client.transcribe(&[], Language::Ta).await.unwrap_err();
        assert!(matches!(err, SpeechError::EmptyAudio));
    }
}
