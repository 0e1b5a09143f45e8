//! Relay configuration

use creative_llms::OpenAIConfig;
use creative_llms::providers::openai::DEFAULT_BASE_URL;

use crate::error::{RelayError, Result};
use crate::persona::PersonaVariant;

/// Model every request is sent to.
pub const DEFAULT_MODEL: &str = "gpt-5.1";

/// Sampling temperature every request is sent with.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const PERSONA_ENV: &str = "CREATIVE_PERSONA";

/// Relay configuration, read once at startup.
#[derive(Clone)]
pub struct RelayConfig {
    /// Provider API key. Absence is reported by the first relay call.
    pub api_key: Option<String>,
    /// Provider endpoint root
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Instruction turn variant
    pub persona: PersonaVariant,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayConfig {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            persona: PersonaVariant::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_persona(mut self, persona: PersonaVariant) -> Self {
        self.persona = persona;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// A missing `OPENAI_API_KEY` is not an error here. An unrecognized
    /// `CREATIVE_PERSONA` is.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RelayConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(api_key) = lookup(API_KEY_ENV) {
            config = config.with_api_key(api_key);
        }

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url;
        }

        if let Some(persona) = lookup(PERSONA_ENV).filter(|p| !p.trim().is_empty()) {
            config.persona = persona
                .parse()
                .map_err(|e| RelayError::Config(format!("{}: {}", PERSONA_ENV, e)))?;
        }

        Ok(config)
    }

    /// Provider configuration derived from this config.
    pub fn provider_config(&self) -> OpenAIConfig {
        let config = OpenAIConfig::without_key().with_base_url(self.base_url.clone());
        match &self.api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }

    /// API key with all but the last four characters masked.
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            let visible = chars.len().saturating_sub(4);
            let tail: String = chars[visible..].iter().collect();
            format!("{}{}", "*".repeat(visible.min(8)), tail)
        })
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.masked_api_key())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("persona", &self.persona)
            .finish()
    }
}
