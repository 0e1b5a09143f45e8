//! OpenAI-specific types

use serde::{Deserialize, Serialize};

/// Default endpoint root for the public API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Clone)]
pub struct OpenAIConfig {
    /// API key for authentication. A missing key is reported when a request
    /// is made, not when the provider is built.
    pub api_key: Option<String>,
    /// API root; requests go to `{base_url}/chat/completions`
    pub base_url: String,
    /// Sent as `OpenAI-Organization`
    pub organization_id: Option<String>,
    /// Sent as `OpenAI-Project`
    pub project_id: Option<String>,
}

impl OpenAIConfig {
    /// Settings with `api_key` and the default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::without_key().with_api_key(api_key)
    }

    /// Config with no API key set.
    pub fn without_key() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            organization_id: None,
            project_id: None,
        }
    }

    /// Set API key. Empty strings count as unset.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        // Accept a full endpoint URL as well as the API root
        if url.ends_with('/') {
            url = url.trim_end_matches('/').to_string();
        }
        if url.ends_with("/chat/completions") {
            url = url.trim_end_matches("/chat/completions").to_string();
        }
        self.base_url = url;
        self
    }

    /// Set organization ID
    pub fn with_organization_id(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    /// Set project ID
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self::without_key()
    }
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("organization_id", &self.organization_id)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Body of a `POST /chat/completions` call
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// OpenAI message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI streaming chunk (`chat.completion.chunk`)
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct OpenAIStreamChunk {
    pub id: Option<String>,
    pub object: Option<String>,
    pub created: Option<u64>,
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<OpenAIStreamChoice>,
    /// In-band failure reported after the stream opened
    pub error: Option<OpenAIStreamError>,
}

/// `{"error": {...}}` payload sent in place of a chunk
#[derive(Debug, Deserialize)]
pub struct OpenAIStreamError {
    #[serde(default)]
    pub message: String,
    pub r#type: Option<String>,
    /// String or number depending on the server
    pub code: Option<serde_json::Value>,
}

impl std::fmt::Display for OpenAIStreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = if self.message.is_empty() {
            "unknown error"
        } else {
            self.message.as_str()
        };
        match (&self.r#type, &self.code) {
            (Some(kind), Some(code)) => write!(f, "{message} ({kind}, code {code})"),
            (Some(kind), None) => write!(f, "{message} ({kind})"),
            (None, Some(code)) => write!(f, "{message} (code {code})"),
            (None, None) => f.write_str(message),
        }
    }
}

/// One entry of a chunk's `choices`
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct OpenAIStreamChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: OpenAIStreamDelta,
    pub finish_reason: Option<String>,
}

/// Incremental message content
#[derive(Debug, Default, Deserialize, Clone)]
#[allow(dead_code)]
pub struct OpenAIStreamDelta {
    pub role: Option<String>,
    pub content: Option<String>,
}
