//! OpenAI streaming support
//!
//! Chat completions stream as SSE:
//! - `data: {"choices":[{"delta":{"content":"..."}}]}` for text deltas
//! - `data: {"choices":[{"delta":{},"finish_reason":"stop"}]}` at the end of a choice
//! - `data: [DONE]` to signal stream end
//! - `data: {"error":{"message":"..."}}` when the server fails mid-stream
//!
//! Failures before the event source reports `Open` are establishment
//! failures ([`Error::Provider`]); later ones are [`Error::Stream`].

use super::convert::parse_finish_reason;
use super::types::OpenAIStreamChunk;
use crate::error::Error;
use crate::types::{GenerateStream, StreamEvent};
use futures::stream::StreamExt;
use reqwest_eventsource::{Event, EventSource};

/// Create a stream from an OpenAI EventSource
pub fn create_stream(mut event_source: EventSource) -> GenerateStream {
    let stream = async_stream::stream! {
        let mut opened = false;
        let mut started = false;

        while let Some(event) = event_source.next().await {
            match event {
                Ok(Event::Open) => {
                    opened = true;
                    continue;
                }
                Ok(Event::Message(message)) => {
                    if message.data == "[DONE]" {
                        break;
                    }

                    match serde_json::from_str::<OpenAIStreamChunk>(&message.data) {
                        Ok(mut chunk) => {
                            if let Some(error) = chunk.error.take() {
                                yield Err(Error::stream_error(format!(
                                    "OpenAI stream error: {}", error
                                )));
                                break;
                            }
                            if !started {
                                started = true;
                                if let Some(id) = chunk.id.clone() {
                                    yield Ok(StreamEvent::start(id));
                                }
                            }
                            for stream_event in process_chunk(chunk) {
                                yield Ok(stream_event);
                            }
                        }
                        Err(e) => {
                            yield Err(Error::stream_error(format!(
                                "Failed to parse OpenAI chunk: {}", e
                            )));
                            break;
                        }
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => break,
                Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    yield Err(Error::provider_error(format!(
                        "OpenAI API error {}: {}", status, error_body
                    )));
                    break;
                }
                Err(reqwest_eventsource::Error::InvalidContentType(content_type, _)) => {
                    yield Err(Error::provider_error(format!(
                        "OpenAI API returned unexpected content type: {:?}", content_type
                    )));
                    break;
                }
                Err(e) if !opened => {
                    yield Err(Error::provider_error(format!("Failed to connect: {}", e)));
                    break;
                }
                Err(e) => {
                    yield Err(Error::stream_error(format!("Stream interrupted: {}", e)));
                    break;
                }
            }
        }

        event_source.close();
    };

    GenerateStream::new(Box::pin(stream))
}

/// Process a single chunk into unified StreamEvent(s)
fn process_chunk(chunk: OpenAIStreamChunk) -> Vec<StreamEvent> {
    let id = chunk.id.unwrap_or_default();
    let mut events = Vec::new();

    for choice in chunk.choices {
        if let Some(content) = choice.delta.content {
            events.push(StreamEvent::text_delta(id.clone(), content));
        }

        if let Some(reason) = choice.finish_reason {
            events.push(StreamEvent::finish(parse_finish_reason(&reason)));
        }
    }

    events
}
