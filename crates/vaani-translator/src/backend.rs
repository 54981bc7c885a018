use std::sync::Arc;

use async_trait::async_trait;
use vaani_types::LanguagePair;

use crate::error::BackendError;

/// Language tags a backend needs alongside the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTags {
    /// ISO 639-3 source tag
    pub source_tag: &'static str,
    /// ISO 639-3 target tag
    pub target_tag: &'static str,
    /// Token prepended to the input by multilingual models, e.g. `>>tam<<`
    pub target_token: Option<&'static str>,
}

/// Which backend serves a pair, and how to address it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendDescriptor {
    /// Identity the model cache keys on. Several pairs may share one id.
    pub backend_id: &'static str,
    pub pair: LanguagePair,
    pub tags: BackendTags,
}

/// A loaded, reusable translation backend
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    fn backend_id(&self) -> &str;

    /// Translate `text` using the pair-specific tags
    async fn invoke(&self, text: &str, tags: &BackendTags) -> Result<String, BackendError>;
}

/// Builds backend handles. Loading is expected to be slow.
#[async_trait]
pub trait BackendLoader: Send + Sync {
    async fn load(
        &self,
        descriptor: &BackendDescriptor,
    ) -> Result<Arc<dyn TranslationBackend>, BackendError>;

    /// Loader name for logs
    fn name(&self) -> &str;
}
