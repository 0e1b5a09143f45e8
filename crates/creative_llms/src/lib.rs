//! creative_llms: streaming chat-completion SDK.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Arc<dyn Provider>                     │
//! │                        │                              │
//! │                        ▼                              │
//! │   ┌──────────────────────────────────────────────┐   │
//! │   │  OpenAIProvider                               │   │
//! │   │  POST /chat/completions (stream=true)         │   │
//! │   │  SSE `data:` chunks ──► StreamEvent           │   │
//! │   └──────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use creative_llms::{GenerateRequest, Message, OpenAIProvider, Provider, StreamEvent};
//! use futures::StreamExt;
//!
//! # async fn run() -> creative_llms::Result<()> {
//! let provider = OpenAIProvider::from_env();
//! let request = GenerateRequest::new("gpt-5.1", vec![Message::user("hello")])
//!     .with_temperature(0.7);
//!
//! let mut stream = provider.stream(request).await?;
//! while let Some(event) = stream.next().await {
//!     if let StreamEvent::TextDelta { delta, .. } = event? {
//!         print!("{delta}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export core abstractions
pub use error::{Error, Result};
pub use provider::Provider;

// Re-export provider implementations
pub use providers::OpenAIProvider;
pub use providers::openai::OpenAIConfig;

// Re-export commonly used types
pub use types::{
    FinishReason, FinishReasonKind, GenerateOptions, GenerateRequest, GenerateStream, Headers,
    Message, Role, StreamEvent,
};
