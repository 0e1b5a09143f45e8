//! OpenAI provider module
//!
//! Chat completions over server-sent events.
//! API docs: https://platform.openai.com/docs/api-reference/chat/streaming

mod convert;
mod provider;
mod stream;
mod types;

pub use provider::OpenAIProvider;
pub use types::{DEFAULT_BASE_URL, OpenAIConfig};
