//! Request and response shapes of the model-inference API.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use vaani_translator::{BackendError, BackendTags};

#[derive(Debug, Serialize)]
pub struct InferenceRequest {
    pub inputs: String,
    pub parameters: Parameters,
    pub options: Options,
}

#[derive(Debug, Serialize)]
pub struct Parameters {
    pub max_length: u32,
}

#[derive(Debug, Serialize)]
pub struct Options {
    /// Block until a cold model is ready instead of answering 503
    pub wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct Generated {
    translation_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Generated(Vec<Generated>),
    Failed { error: String },
}

impl InferenceRequest {
    /// Multilingual models expect the target token in front of the input
    pub fn new(text: &str, tags: &BackendTags, max_length: u32) -> Self {
        let inputs = match tags.target_token {
            Some(token) => format!("{} {}", token, text),
            None => text.to_string(),
        };

        Self {
            inputs,
            parameters: Parameters { max_length },
            options: Options {
                wait_for_model: true,
            },
        }
    }
}

/// Extract the first translation from a response body
pub fn parse_response(backend_id: &str, body: &str) -> Result<String, BackendError> {
    let invalid = |reason: String| BackendError::Invoke {
        backend_id: backend_id.to_string(),
        reason,
        retryable: false,
    };

    let response: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| invalid(format!("Failed to parse response: {}", e)))?;

    match response {
        InferenceResponse::Generated(generated) => generated
            .into_iter()
            .next()
            .map(|g| g.translation_text.trim().to_string())
            .ok_or_else(|| invalid("No translation in response".to_string())),
        InferenceResponse::Failed { error } => Err(invalid(error)),
    }
}

/// Error for a failed translation call, `None` on success
pub fn invoke_status_error(backend_id: &str, status: StatusCode) -> Option<BackendError> {
    if status.is_success() {
        return None;
    }

    Some(match status.as_u16() {
        429 => BackendError::RateLimitExceeded,
        401 | 403 => BackendError::AuthenticationError,
        code => BackendError::Invoke {
            backend_id: backend_id.to_string(),
            reason: format!("HTTP {}", status),
            retryable: code >= 500,
        },
    })
}

/// Error for a failed model probe, `None` when the model exists
pub fn load_status_error(backend_id: &str, status: StatusCode) -> Option<BackendError> {
    if status.is_success() {
        return None;
    }

    Some(match status.as_u16() {
        429 => BackendError::RateLimitExceeded,
        401 | 403 => BackendError::AuthenticationError,
        404 => BackendError::Load {
            backend_id: backend_id.to_string(),
            reason: "model not found".to_string(),
        },
        code if code >= 500 => BackendError::Unavailable {
            backend_id: backend_id.to_string(),
            reason: format!("HTTP {}", status),
        },
        _ => BackendError::Load {
            backend_id: backend_id.to_string(),
            reason: format!("HTTP {}", status),
        },
    })
}
