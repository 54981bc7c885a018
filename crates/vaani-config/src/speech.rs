use std::env;

use serde::{Deserialize, Serialize};

fn default_stt_url() -> String {
    "https://api.openai.com/v1/audio/transcriptions".to_string()
}

fn default_stt_model() -> String {
    "whisper-1".to_string()
}

fn default_tts_url() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whisper-compatible transcription endpoint
    #[serde(default = "default_stt_url")]
    pub stt_url: String,
    #[serde(default = "default_stt_model")]
    pub stt_model: String,
    #[serde(default)]
    pub stt_api_key: String,
    #[serde(default = "default_tts_url")]
    pub tts_url: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_url: default_stt_url(),
            stt_model: default_stt_model(),
            stt_api_key: String::new(),
            tts_url: default_tts_url(),
        }
    }
}

impl SpeechConfig {
    pub fn new() -> Self {
        Self {
            stt_url: env::var("VAANI_STT_URL").unwrap_or_else(|_| default_stt_url()),
            stt_model: env::var("VAANI_STT_MODEL").unwrap_or_else(|_| default_stt_model()),
            stt_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            tts_url: env::var("VAANI_TTS_URL").unwrap_or_else(|_| default_tts_url()),
        }
    }
}
