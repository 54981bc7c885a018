use std::sync::Arc;

use vaani_core::RetryableError;

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair { from: String, to: String },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Failure while constructing or invoking a translation backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to load backend {backend_id}: {reason}")]
    Load { backend_id: String, reason: String },

    #[error("Backend {backend_id} failed: {reason}")]
    Invoke {
        backend_id: String,
        reason: String,
        retryable: bool,
    },

    /// Server-side failure that may clear up, e.g. a model still warming up
    #[error("Backend {backend_id} unavailable: {reason}")]
    Unavailable { backend_id: String, reason: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    /// Outcome of a load that several callers awaited together
    #[error(transparent)]
    Shared(Arc<BackendError>),
}

impl BackendError {
    /// Take the error out of a shared load, or wrap it while other callers hold it
    pub fn unshare(error: Arc<BackendError>) -> Self {
        Arc::try_unwrap(error).unwrap_or_else(BackendError::Shared)
    }
}

impl RetryableError for BackendError {
    fn is_retryable(&self) -> bool {
        match self {
            BackendError::Invoke { retryable, .. } => *retryable,
            BackendError::NetworkError(e) => e.is_timeout() || e.is_connect(),
            BackendError::Unavailable { .. } | BackendError::RateLimitExceeded => true,
            BackendError::Shared(inner) => inner.is_retryable(),
            BackendError::Load { .. } | BackendError::AuthenticationError => false,
        }
    }
}
