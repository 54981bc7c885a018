//! Deterministic loader and backend for exercising the dispatcher without a
//! model server.
//!
//! ```ignore
//! let loader = Arc::new(MockLoader::new());
//! let cache = Arc::new(ModelCache::new(loader.clone()));
//! let dispatcher = TranslationDispatcher::with_cache(cache);
//! let out = dispatcher.translate("hello", "en", "ta").await?;
//! assert_eq!(out.text, "hello_tam");
//! assert_eq!(loader.load_count(), 1);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::backend::{BackendDescriptor, BackendLoader, BackendTags, TranslationBackend};
use crate::error::BackendError;

/// How a [`MockBackend`] answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockMode {
    /// "hello" -> "hello_tam", with the target token in front when present
    Suffix,
    /// Always returns the same text
    Fixed(String),
    /// Every invocation fails
    Error(String),
}

#[derive(Debug)]
pub struct MockBackend {
    backend_id: String,
    mode: MockMode,
    invocations: AtomicUsize,
}

impl MockBackend {
    pub fn new(backend_id: &str, mode: MockMode) -> Self {
        Self {
            backend_id: backend_id.to_string(),
            mode,
            invocations: AtomicUsize::new(0),
        }
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    fn backend_id(&self) -> &str {
        &self.backend_id
    }

    async fn invoke(&self, text: &str, tags: &BackendTags) -> Result<String, BackendError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);

        match &self.mode {
            MockMode::Suffix => Ok(match tags.target_token {
                Some(token) => format!("{} {}_{}", token, text, tags.target_tag),
                None => format!("{}_{}", text, tags.target_tag),
            }),
            MockMode::Fixed(output) => Ok(output.clone()),
            MockMode::Error(reason) => Err(BackendError::Invoke {
                backend_id: self.backend_id.clone(),
                reason: reason.clone(),
                retryable: false,
            }),
        }
    }
}

/// Counts constructions and can be slowed down or made to fail
#[derive(Debug)]
pub struct MockLoader {
    mode: MockMode,
    delay: Duration,
    /// Number of leading load attempts that fail
    failures: usize,
    attempts: AtomicUsize,
    loads: AtomicUsize,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::with_mode(MockMode::Suffix)
    }

    pub fn with_mode(mode: MockMode) -> Self {
        Self {
            mode,
            delay: Duration::ZERO,
            failures: 0,
            attempts: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
        }
    }

    /// Simulated model download time
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the first `count` load attempts
    pub fn failing_first(mut self, count: usize) -> Self {
        self.failures = count;
        self
    }

    /// Successful constructions
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// All load attempts, failed ones included
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for MockLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendLoader for MockLoader {
    async fn load(
        &self,
        descriptor: &BackendDescriptor,
    ) -> Result<Arc<dyn TranslationBackend>, BackendError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if attempt < self.failures {
            return Err(BackendError::Load {
                backend_id: descriptor.backend_id.to_string(),
                reason: format!("simulated failure {}", attempt + 1),
            });
        }

        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockBackend::new(
            descriptor.backend_id,
            self.mode.clone(),
        )))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
