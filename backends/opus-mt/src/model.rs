use std::sync::Arc;

use async_trait::async_trait;
use vaani_translator::{BackendError, BackendTags, TranslationBackend};

use crate::loader::OpusMtSettings;
use crate::wire::{InferenceRequest, invoke_status_error, parse_response};

/// A probed OPUS-MT model, addressed over HTTP
#[derive(Clone)]
pub struct OpusMtModel {
    client: reqwest::Client,
    settings: Arc<OpusMtSettings>,
    backend_id: String,
    url: String,
}

impl OpusMtModel {
    pub(crate) fn new(
        client: reqwest::Client,
        settings: Arc<OpusMtSettings>,
        backend_id: &str,
    ) -> Self {
        let url = settings.model_url(backend_id);
        Self {
            client,
            settings,
            backend_id: backend_id.to_string(),
            url,
        }
    }

    async fn send(&self, request: &InferenceRequest) -> Result<String, BackendError> {
        let mut builder = self.client.post(&self.url).json(request);
        if let Some(token) = &self.settings.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;

        if let Some(err) = invoke_status_error(&self.backend_id, response.status()) {
            return Err(err);
        }

        let body = response.text().await?;
        parse_response(&self.backend_id, &body)
    }
}

#[async_trait]
impl TranslationBackend for OpusMtModel {
    fn backend_id(&self) -> &str {
        &self.backend_id
    }

    async fn invoke(&self, text: &str, tags: &BackendTags) -> Result<String, BackendError> {
        let request = InferenceRequest::new(text, tags, self.settings.max_length);

        tracing::debug!(
            backend_id = %self.backend_id,
            target = tags.target_tag,
            chars = text.chars().count(),
            "invoking translation model"
        );

        self.settings
            .retry
            .run("opus-mt translate", || self.send(&request))
            .await
    }
}

impl std::fmt::Debug for OpusMtModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpusMtModel")
            .field("backend_id", &self.backend_id)
            .field("url", &self.url)
            .finish()
    }
}
