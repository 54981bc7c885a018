use std::sync::Arc;
use std::time::Duration;

use vaani_config::{Config, OverrideConfig};
use vaani_opus_mt::{OpusMtLoader, OpusMtSettings};
use vaani_speech::{
    GoogleTts, GoogleTtsSettings, Retrying, SpeechSynthesizer, SpeechToText, WhisperClient,
    WhisperSettings,
};
use vaani_translator::{
    ModelCache, OverrideRule, OverrideRules, PairResolver, TranslationDispatcher,
};
use vaani_types::LanguagePair;

pub struct AppState {
    pub config: Config,
    pub dispatcher: TranslationDispatcher,
    pub stt: Arc<dyn SpeechToText>,
    pub tts: Arc<dyn SpeechSynthesizer>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Built-in rules first, configured rules after them
pub fn override_rules(extra: &[OverrideConfig]) -> OverrideRules {
    let mut rules = OverrideRules::builtin();
    rules.extend(extra.iter().map(|o| {
        OverrideRule::new(
            LanguagePair::new(o.source, o.target),
            &o.prefix,
            &o.replacement,
        )
    }));
    rules
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let policy = config.retry.policy();

        let loader = OpusMtLoader::new(OpusMtSettings {
            base_url: config.translator.api_url.clone(),
            api_token: non_empty(&config.translator.api_token),
            max_length: config.translator.max_length,
            retry: policy.clone(),
        });
        let cache = Arc::new(ModelCache::new(Arc::new(loader)));
        let dispatcher = TranslationDispatcher::new(
            PairResolver::shared(),
            cache,
            override_rules(&config.translator.overrides),
        );

        let stt = WhisperClient::new(WhisperSettings {
            url: config.speech.stt_url.clone(),
            model: config.speech.stt_model.clone(),
            api_key: non_empty(&config.speech.stt_api_key),
        });
        let tts = GoogleTts::new(GoogleTtsSettings {
            url: config.speech.tts_url.clone(),
        });

        Self {
            dispatcher,
            stt: Arc::new(Retrying::new(stt, policy.clone())),
            tts: Arc::new(Retrying::new(tts, policy)),
            config,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaani_types::Language;

    #[test]
    fn test_configured_rules_follow_builtin() {
        let extra = vec![OverrideConfig {
            source: Language::En,
            target: Language::Hi,
            prefix: "Good".to_string(),
            replacement: "अच्छा".to_string(),
        }];
        let rules = override_rules(&extra);
        let en_hi = LanguagePair::new(Language::En, Language::Hi);

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.apply(en_hi, "good morning"), Some("सुप्रभात"));
        assert_eq!(rules.apply(en_hi, "good luck"), Some("अच्छा"));
    }

    #[test]
    fn test_state_from_defaults() {
        let state = AppState::new(Config::default());
        assert_eq!(state.request_timeout(), Duration::from_secs(60));
        assert_eq!(state.stt.name(), "whisper");
        assert_eq!(state.tts.name(), "google-tts");
        assert_eq!(state.dispatcher.overrides().len(), 2);
    }
}
