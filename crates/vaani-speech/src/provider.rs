use async_trait::async_trait;
use vaani_core::RetryPolicy;
use vaani_types::Language;

use crate::error::SpeechError;

/// Audio bytes in, transcript out
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<String, SpeechError>;

    /// Provider name for logs
    fn name(&self) -> &str;
}

/// Text in, MP3 bytes out.
///
/// Implementations handle provider length limits themselves and return a
/// single merged stream.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SpeechError>;

    fn name(&self) -> &str;
}

/// Runs every call of the wrapped provider under a [`RetryPolicy`]
#[derive(Debug, Clone)]
pub struct Retrying<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P> Retrying<P> {
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<P: SpeechToText> SpeechToText for Retrying<P> {
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<String, SpeechError> {
        self.policy
            .run(self.inner.name(), || self.inner.transcribe(audio, language))
            .await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl<P: SpeechSynthesizer> SpeechSynthesizer for Retrying<P> {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SpeechError> {
        self.policy
            .run(self.inner.name(), || self.inner.synthesize(text, language))
            .await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
