//! Streaming chat completions over SSE

use super::convert::to_openai_request;
use super::stream::create_stream;
use super::types::OpenAIConfig;
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateStream, Headers};
use async_trait::async_trait;
use reqwest::Client;
use reqwest_eventsource::EventSource;

/// OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Variable holding the bearer token
    pub const API_KEY_ENV: &'static str = "OPENAI_API_KEY";
    /// Environment variable for an alternative endpoint root
    pub const BASE_URL_ENV: &'static str = "OPENAI_BASE_URL";

    /// Create a new OpenAI provider. Never fails: a missing key is reported
    /// by the first [`Provider::stream`] call.
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Provider configured from `OPENAI_API_KEY` and `OPENAI_BASE_URL`
    pub fn from_env() -> Self {
        let api_key = std::env::var(Self::API_KEY_ENV).unwrap_or_default();
        let mut config = OpenAIConfig::without_key().with_api_key(api_key);
        if let Ok(base_url) = std::env::var(Self::BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Self::new(config)
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();

        if let Some(ref api_key) = self.config.api_key {
            headers.insert("Authorization", format!("Bearer {}", api_key));
        }
        headers.insert("Content-Type", "application/json");

        if let Some(ref org_id) = self.config.organization_id {
            headers.insert("OpenAI-Organization", org_id);
        }

        if let Some(ref project_id) = self.config.project_id {
            headers.insert("OpenAI-Project", project_id);
        }

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        if self.config.api_key.is_none() {
            return Err(Error::MissingApiKey(self.provider_id().to_string()));
        }

        let url = self.config.chat_completions_url();
        let openai_req = to_openai_request(&request, true);
        let headers = self.build_headers(request.options.headers.as_ref());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            provider = self.provider_id(),
            model = %request.model,
            messages = request.messages.len(),
            url = %url,
            "Opening chat completion stream"
        );

        let req_builder = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&openai_req);

        let event_source = EventSource::new(req_builder)
            .map_err(|e| Error::provider_error(format!("Failed to create event source: {}", e)))?;

        Ok(create_stream(event_source))
    }
}
