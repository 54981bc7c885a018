use vaani_core::RetryableError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Audio is empty")]
    EmptyAudio,

    #[error("Text is empty")]
    EmptyText,

    #[error("API error: {message}")]
    ApiError { message: String, retryable: bool },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl SpeechError {
    pub(crate) fn api(message: impl Into<String>) -> Self {
        SpeechError::ApiError {
            message: message.into(),
            retryable: false,
        }
    }

    /// Maps a non-success HTTP status, `None` on success
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }

        Some(match status.as_u16() {
            429 => SpeechError::RateLimitExceeded,
            401 | 403 => SpeechError::AuthenticationError,
            code => SpeechError::ApiError {
                message: format!("HTTP {}", status),
                retryable: code >= 500,
            },
        })
    }
}

impl RetryableError for SpeechError {
    fn is_retryable(&self) -> bool {
        match self {
            SpeechError::ApiError { retryable, .. } => *retryable,
            SpeechError::NetworkError(e) => e.is_timeout() || e.is_connect(),
            SpeechError::RateLimitExceeded => true,
            SpeechError::EmptyAudio | SpeechError::EmptyText | SpeechError::AuthenticationError => {
                false
            }
        }
    }
}
