//! Observability errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// The filter directive or the OTLP exporter could not be built.
    #[error("Observability setup failed: {0}")]
    InitFailed(String),

    /// Another global subscriber is already installed.
    #[error("Global subscriber already set: {0}")]
    AlreadyInitialized(String),
}
