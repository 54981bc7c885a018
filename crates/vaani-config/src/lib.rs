use std::env;

use serde::{Deserialize, Serialize};

use self::retry::RetryConfig;
use self::speech::SpeechConfig;
use self::translator::TranslatorConfig;

pub mod retry;
pub mod speech;
pub mod translator;

pub use translator::OverrideConfig;

fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub speech: SpeechConfig,
    pub retry: RetryConfig,

    /// Upper bound for one request, model loading included
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            speech: SpeechConfig::default(),
            retry: RetryConfig::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        let request_timeout_secs = env::var("VAANI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_secs);

        Config {
            translator: TranslatorConfig::new(),
            speech: SpeechConfig::new(),
            retry: RetryConfig::new(),
            request_timeout_secs,
        }
    }

    /// Fill credentials a config file left blank from the environment.
    /// Tokens are usually kept out of checked-in files.
    pub fn with_env_secrets(mut self) -> Self {
        if self.translator.api_token.is_empty() {
            self.translator.api_token = env::var("HF_API_TOKEN").unwrap_or_default();
        }
        if self.speech.stt_api_key.is_empty() {
            self.speech.stt_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        }
        self
    }
}
