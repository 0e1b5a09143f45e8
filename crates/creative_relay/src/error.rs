//! Relay error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing or invalid configuration, such as an absent API key.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The inbound conversation is malformed or carries a role the caller
    /// may not send.
    #[error("Invalid conversation: {0}")]
    InvalidConversation(String),

    /// The provider stream could not be established.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider stream broke after it was established. Fragments already
    /// forwarded stand.
    #[error("Stream error: {0}")]
    Stream(String),
}

impl From<creative_llms::Error> for RelayError {
    fn from(err: creative_llms::Error) -> Self {
        match err {
            creative_llms::Error::MissingApiKey(provider) => RelayError::Config(format!(
                "missing API key for provider '{}' (set {})",
                provider,
                crate::config::API_KEY_ENV
            )),
            creative_llms::Error::Provider(message) => RelayError::Provider(message),
            creative_llms::Error::Stream(message) => RelayError::Stream(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
