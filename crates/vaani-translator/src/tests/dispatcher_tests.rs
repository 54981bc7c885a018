//! End-to-end dispatch over mock backends

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vaani_types::{Language, LanguagePair};

use crate::backend::{BackendDescriptor, TranslationBackend};
use crate::cache::{BackendCache, ModelCache};
use crate::dispatcher::TranslationDispatcher;
use crate::error::{BackendError, TranslateError};
use crate::mock::{MockBackend, MockLoader, MockMode};
use crate::overrides::{OverrideRule, OverrideRules};
use crate::resolver::PairResolver;

fn dispatcher_with(loader: Arc<MockLoader>) -> TranslationDispatcher {
    TranslationDispatcher::with_cache(Arc::new(ModelCache::new(loader)))
}

/// Records requested backend ids and always hands out one backend
struct RecordingCache {
    backend: Arc<MockBackend>,
    requested: Mutex<Vec<String>>,
}

#[async_trait]
impl BackendCache for RecordingCache {
    async fn get_or_load(
        &self,
        descriptor: &BackendDescriptor,
    ) -> Result<Arc<dyn TranslationBackend>, BackendError> {
        self.requested
            .lock()
            .unwrap()
            .push(descriptor.backend_id.to_string());
        Ok(self.backend.clone())
    }
}

#[tokio::test]
async fn test_translate_returns_backend_output() {
    let loader = Arc::new(MockLoader::new());
    let dispatcher = dispatcher_with(loader.clone());

    let out = dispatcher.translate("hello", "en", "ta").await.unwrap();
    assert_eq!(out.text, "hello_tam");
    assert_eq!(out.backend_id, "Helsinki-NLP/opus-mt-en-ta");
    assert_eq!(out.pair, LanguagePair::new(Language::En, Language::Ta));
    assert!(!out.overridden);
}

#[tokio::test]
async fn test_multilingual_target_token_reaches_backend() {
    let dispatcher = dispatcher_with(Arc::new(MockLoader::new()));

    let out = dispatcher.translate("hello", "en", "ml").await.unwrap();
    assert_eq!(out.text, ">>mal<< hello_mal");
}

#[tokio::test]
async fn test_greeting_override_for_en_hi() {
    let loader = Arc::new(MockLoader::with_mode(MockMode::Fixed("अच्छा सुबह".to_string())));
    let dispatcher = dispatcher_with(loader.clone());

    let out = dispatcher.translate("Good morning", "en", "hi").await.unwrap();
    assert_eq!(out.text, "सुप्रभात");
    assert!(out.overridden);

    let out = dispatcher.translate("  good night everyone", "en", "hi").await.unwrap();
    assert_eq!(out.text, "शुभ रात्रि");

    // Backend is still invoked and loaded once
    assert_eq!(loader.load_count(), 1);
}

#[tokio::test]
async fn test_non_matching_input_keeps_backend_output() {
    let loader = Arc::new(MockLoader::with_mode(MockMode::Fixed("नमस्ते".to_string())));
    let dispatcher = dispatcher_with(loader);

    let out = dispatcher.translate("hello", "en", "hi").await.unwrap();
    assert_eq!(out.text, "नमस्ते");
    assert!(!out.overridden);
}

#[tokio::test]
async fn test_override_is_pair_specific() {
    let dispatcher = dispatcher_with(Arc::new(MockLoader::new()));

    let out = dispatcher.translate("good morning", "en", "ta").await.unwrap();
    assert_eq!(out.text, "good morning_tam");
    assert!(!out.overridden);
}

#[tokio::test]
async fn test_unknown_target_fails_without_loading() {
    let loader = Arc::new(MockLoader::new());
    let dispatcher = dispatcher_with(loader.clone());

    match dispatcher.translate("Good morning", "en", "xx").await {
        Err(TranslateError::UnsupportedLanguagePair { from, to }) => {
            assert_eq!(from, "en");
            assert_eq!(to, "xx");
        }
        other => panic!("Expected UnsupportedLanguagePair, got {:?}", other),
    }
    assert_eq!(loader.attempt_count(), 0);
}

#[tokio::test]
async fn test_pair_without_backend_fails() {
    let dispatcher = dispatcher_with(Arc::new(MockLoader::new()));

    let err = dispatcher
        .translate_pair("hello", LanguagePair::new(Language::Hi, Language::Ta))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unsupported language pair: hi -> ta");
}

#[tokio::test]
async fn test_load_failure_surfaces_then_recovers() {
    let loader = Arc::new(MockLoader::new().failing_first(1));
    let dispatcher = dispatcher_with(loader.clone());

    let err = dispatcher.translate("hello", "te", "en").await.unwrap_err();
    assert!(matches!(err, TranslateError::Backend(BackendError::Load { .. })));

    let out = dispatcher.translate("hello", "te", "en").await.unwrap();
    assert_eq!(out.text, "hello_eng");
    assert_eq!(loader.attempt_count(), 2);
}

#[tokio::test]
async fn test_invoke_failure_is_not_swallowed_by_override() {
    let loader = Arc::new(MockLoader::with_mode(MockMode::Error("boom".to_string())));
    let dispatcher = dispatcher_with(loader);

    let err = dispatcher.translate("good morning", "en", "hi").await.unwrap_err();
    assert!(matches!(err, TranslateError::Backend(BackendError::Invoke { .. })));
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn test_injected_cache_and_custom_rules() {
    let backend = Arc::new(MockBackend::new("fake", MockMode::Fixed("raw".to_string())));
    let cache = Arc::new(RecordingCache {
        backend: backend.clone(),
        requested: Mutex::new(Vec::new()),
    });

    let en_pa = LanguagePair::new(Language::En, Language::Pa);
    let rules = OverrideRules::empty().with(OverrideRule::new(en_pa, "Thanks", "ਧੰਨਵਾਦ"));
    let dispatcher = TranslationDispatcher::new(PairResolver::shared(), cache.clone(), rules);

    let out = dispatcher.translate("thanks a lot", "en", "pa").await.unwrap();
    assert_eq!(out.text, "ਧੰਨਵਾਦ");
    let out = dispatcher.translate("good morning", "en", "hi").await.unwrap();
    assert_eq!(out.text, "raw");

    assert_eq!(backend.invocation_count(), 2);
    assert_eq!(
        *cache.requested.lock().unwrap(),
        vec!["Helsinki-NLP/opus-mt-en-pa", "Helsinki-NLP/opus-mt-en-hi"]
    );
}

#[test]
fn test_supported_pairs_passthrough() {
    let dispatcher = dispatcher_with(Arc::new(MockLoader::new()));
    let pairs = dispatcher.supported_pairs();
    assert_eq!(pairs.len(), 18);
    assert!(pairs.contains(&LanguagePair::new(Language::Kn, Language::En)));
    assert_eq!(dispatcher.overrides().len(), 2);
}
