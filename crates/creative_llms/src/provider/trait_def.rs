use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateStream, Headers};

/// A completion backend that can stream incremental output.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier used in logs and error messages.
    fn provider_id(&self) -> &str;

    /// Headers sent with every request, merged with `custom_headers`.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Open a streaming completion.
    ///
    /// Implementations may defer connection errors to the first stream item;
    /// those are reported as [`crate::Error::Provider`].
    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream>;
}
