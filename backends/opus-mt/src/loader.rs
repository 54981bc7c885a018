use std::sync::Arc;

use async_trait::async_trait;
use vaani_core::RetryPolicy;
use vaani_translator::{BackendDescriptor, BackendError, BackendLoader, TranslationBackend};

use crate::model::OpusMtModel;
use crate::wire::load_status_error;

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MAX_LENGTH: u32 = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct OpusMtSettings {
    /// Inference API root; models live under `{base_url}/models/{id}`
    pub base_url: String,
    pub api_token: Option<String>,
    /// Generation cap passed with every request
    pub max_length: u32,
    pub retry: RetryPolicy,
}

impl Default for OpusMtSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            max_length: DEFAULT_MAX_LENGTH,
            retry: RetryPolicy::default(),
        }
    }
}

impl OpusMtSettings {
    pub fn model_url(&self, backend_id: &str) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), backend_id)
    }
}

/// Loads Helsinki-NLP OPUS-MT models by probing the inference API
#[derive(Debug, Clone)]
pub struct OpusMtLoader {
    client: reqwest::Client,
    settings: Arc<OpusMtSettings>,
}

impl OpusMtLoader {
    pub fn new(settings: OpusMtSettings) -> Self {
        Self::with_client(reqwest::Client::new(), settings)
    }

    pub fn with_client(client: reqwest::Client, settings: OpusMtSettings) -> Self {
        Self {
            client,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &OpusMtSettings {
        &self.settings
    }

    async fn probe(&self, backend_id: &str) -> Result<(), BackendError> {
        let mut builder = self.client.get(self.settings.model_url(backend_id));
        if let Some(token) = &self.settings.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        match load_status_error(backend_id, response.status()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BackendLoader for OpusMtLoader {
    async fn load(
        &self,
        descriptor: &BackendDescriptor,
    ) -> Result<Arc<dyn TranslationBackend>, BackendError> {
        let backend_id = descriptor.backend_id;

        self.settings
            .retry
            .run("opus-mt probe", || self.probe(backend_id))
            .await?;

        tracing::debug!(backend_id, "model available");

        Ok(Arc::new(OpusMtModel::new(
            self.client.clone(),
            Arc::clone(&self.settings),
            backend_id,
        )))
    }

    fn name(&self) -> &str {
        "opus-mt"
    }
}
