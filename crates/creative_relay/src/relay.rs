//! The relay: instruction turn + session conversation in, fragments out.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use creative_llms::{GenerateRequest, Message, OpenAIProvider, Provider, StreamEvent};
use creative_observability::{record_duration, record_error, relay_span};
use futures::{Stream, StreamExt};
use tracing::{Instrument, debug, warn};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::turn::{Turn, validate_conversation};

/// One incremental piece of generated text. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Fragment {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Lazy, forward-only sequence of fragments for one invocation.
///
/// Nothing is sent to the provider until the first poll. After an error item
/// the stream yields `None`. Dropping it closes the provider connection.
pub struct FragmentStream {
    inner: Pin<Box<dyn Stream<Item = Result<Fragment, RelayError>> + Send>>,
}

impl Stream for FragmentStream {
    type Item = Result<Fragment, RelayError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for FragmentStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentStream").finish_non_exhaustive()
    }
}

/// Prepends the instruction turn to a conversation and relays the provider's
/// streamed completion.
#[derive(Clone)]
pub struct Relay {
    config: RelayConfig,
    provider: Arc<dyn Provider>,
    instruction: &'static Turn,
}

impl Relay {
    pub fn new(config: RelayConfig, provider: Arc<dyn Provider>) -> Self {
        let instruction = config.persona.instruction_turn();
        Self {
            config,
            provider,
            instruction,
        }
    }

    /// Relay backed by the OpenAI provider described by `config`.
    pub fn from_config(config: RelayConfig) -> Self {
        let provider = OpenAIProvider::new(config.provider_config());
        Self::new(config, Arc::new(provider))
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn instruction_turn(&self) -> &'static Turn {
        self.instruction
    }

    /// `[instruction] + conversation`, freshly built.
    pub fn outbound_request(&self, conversation: &[Turn]) -> Vec<Turn> {
        std::iter::once(self.instruction)
            .chain(conversation)
            .cloned()
            .collect()
    }

    fn generate_request(&self, conversation: &[Turn]) -> GenerateRequest {
        let messages = std::iter::once(self.instruction)
            .chain(conversation)
            .map(Message::from)
            .collect();
        GenerateRequest::new(self.config.model.clone(), messages)
            .with_temperature(self.config.temperature)
    }

    /// Stream the completion for `conversation`.
    ///
    /// Text deltas are forwarded in receipt order; empty deltas are skipped.
    /// Provider failures surface as a single error item that ends the stream.
    /// A conversation holding a `system` turn yields a single
    /// [`RelayError::InvalidConversation`] and never reaches the provider.
    pub fn handle(&self, conversation: &[Turn]) -> FragmentStream {
        let rejected = validate_conversation(conversation).err();
        let request = self.generate_request(conversation);
        let provider = Arc::clone(&self.provider);
        let span = relay_span!(
            self.config.model,
            self.config.persona,
            conversation.len()
        );

        let stream = async_stream::stream! {
            let start = Instant::now();
            if let Some(err) = rejected {
                span.in_scope(|| record_error(&err));
                yield Err(err);
                return;
            }

            span.in_scope(|| debug!(messages = request.messages.len(), "Opening relay stream"));

            match provider.stream(request).instrument(span.clone()).await {
                Err(e) => {
                    let err = RelayError::from(e);
                    span.in_scope(|| record_error(&err));
                    yield Err(err);
                }
                Ok(mut upstream) => {
                    let mut forwarded: u64 = 0;

                    while let Some(event) = upstream.next().await {
                        match event {
                            Ok(StreamEvent::TextDelta { delta, .. }) => {
                                if delta.is_empty() {
                                    continue;
                                }
                                forwarded += 1;
                                yield Ok(Fragment(delta));
                            }
                            Ok(StreamEvent::Start { id }) => {
                                span.in_scope(|| debug!(generation.id = %id, "Provider stream started"));
                            }
                            Ok(StreamEvent::Finish { reason }) => {
                                span.in_scope(|| debug!(reason = ?reason.unified, "Provider finished"));
                            }
                            Err(e) => {
                                let err = RelayError::from(e);
                                span.in_scope(|| {
                                    if forwarded > 0 {
                                        warn!(fragments = forwarded, "Relay stream interrupted");
                                    }
                                    record_error(&err);
                                });
                                yield Err(err);
                                break;
                            }
                        }
                    }

                    span.record("relay.fragments", forwarded);
                }
            }

            span.in_scope(|| {
                record_duration("relay.duration_ms", start.elapsed());
                debug!("Relay stream closed");
            });
        };

        FragmentStream {
            inner: Box::pin(stream),
        }
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("config", &self.config)
            .field("provider", &self.provider.provider_id())
            .finish_non_exhaustive()
    }
}
