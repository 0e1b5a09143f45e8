//! SDK error types

use thiserror::Error;

/// Errors produced by providers and their streams.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was configured for the provider.
    #[error("Missing API key for provider: {0}")]
    MissingApiKey(String),

    /// The request could not be established (transport failure before the
    /// stream opened, or a non-success HTTP status).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The stream failed after it was established.
    #[error("Stream error: {0}")]
    Stream(String),
}

impl Error {
    pub fn provider_error(message: impl Into<String>) -> Self {
        Error::Provider(message.into())
    }

    pub fn stream_error(message: impl Into<String>) -> Self {
        Error::Stream(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
