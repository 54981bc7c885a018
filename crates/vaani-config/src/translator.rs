use std::env;

use serde::{Deserialize, Serialize};
use vaani_types::Language;

fn default_api_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_max_length() -> u32 {
    256
}

/// Extra override rule, applied after the built-in ones
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OverrideConfig {
    pub source: Language,
    pub target: Language,
    pub prefix: String,
    pub replacement: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Model-inference API root
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default)]
    pub overrides: Vec<OverrideConfig>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: String::new(),
            max_length: default_max_length(),
            overrides: vec![],
        }
    }
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let api_url = env::var("VAANI_TRANSLATOR_URL").unwrap_or_else(|_| default_api_url());

        let max_length = env::var("VAANI_MAX_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_length);

        Self {
            api_url,
            api_token: env::var("HF_API_TOKEN").unwrap_or_default(),
            max_length,
            overrides: vec![],
        }
    }
}
