use std::sync::Arc;

use serde::Serialize;
use vaani_types::LanguagePair;

use crate::backend::BackendDescriptor;
use crate::cache::BackendCache;
use crate::error::TranslateError;
use crate::overrides::OverrideRules;
use crate::resolver::PairResolver;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub text: String,
    pub pair: LanguagePair,
    pub backend_id: String,
    /// True when an override rule replaced the backend output
    pub overridden: bool,
}

/// Entry point for translation requests.
///
/// Resolves the pair, fetches the backend from the cache (loading it on
/// first use), invokes it, then applies override rules. Errors from any
/// step are returned as-is; nothing here retries.
pub struct TranslationDispatcher {
    resolver: Arc<PairResolver>,
    cache: Arc<dyn BackendCache>,
    overrides: OverrideRules,
}

impl TranslationDispatcher {
    pub fn new(
        resolver: Arc<PairResolver>,
        cache: Arc<dyn BackendCache>,
        overrides: OverrideRules,
    ) -> Self {
        Self {
            resolver,
            cache,
            overrides,
        }
    }

    /// Dispatcher over the built-in pair table and override rules
    pub fn with_cache(cache: Arc<dyn BackendCache>) -> Self {
        Self::new(PairResolver::shared(), cache, OverrideRules::builtin())
    }

    pub fn overrides(&self) -> &OverrideRules {
        &self.overrides
    }

    pub fn supported_pairs(&self) -> Vec<LanguagePair> {
        self.resolver.supported_pairs()
    }

    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Translation, TranslateError> {
        let descriptor = *self.resolver.resolve(source, target)?;
        self.dispatch(text, descriptor).await
    }

    pub async fn translate_pair(
        &self,
        text: &str,
        pair: LanguagePair,
    ) -> Result<Translation, TranslateError> {
        let descriptor = *self.resolver.resolve_pair(pair)?;
        self.dispatch(text, descriptor).await
    }

    async fn dispatch(
        &self,
        text: &str,
        descriptor: BackendDescriptor,
    ) -> Result<Translation, TranslateError> {
        tracing::debug!(
            pair = %descriptor.pair,
            backend_id = descriptor.backend_id,
            "resolved translation backend"
        );

        let backend = self.cache.get_or_load(&descriptor).await?;
        let output = backend.invoke(text, &descriptor.tags).await?;

        let (text, overridden) = match self.overrides.apply(descriptor.pair, text) {
            Some(replacement) => {
                tracing::debug!(pair = %descriptor.pair, "override rule applied");
                (replacement.to_string(), true)
            }
            None => (output, false),
        };

        Ok(Translation {
            text,
            pair: descriptor.pair,
            backend_id: descriptor.backend_id.to_string(),
            overridden,
        })
    }
}
