//! Conversion between unified types and OpenAI types

use super::types::{OpenAIMessage, OpenAIRequest};
use crate::types::{FinishReason, FinishReasonKind, GenerateRequest, Message};

/// Convert unified request to OpenAI request
pub fn to_openai_request(req: &GenerateRequest, stream: bool) -> OpenAIRequest {
    OpenAIRequest {
        model: req.model.clone(),
        messages: req.messages.iter().map(to_openai_message).collect(),
        temperature: req.options.temperature,
        max_completion_tokens: req.options.max_tokens,
        stream: stream.then_some(true),
    }
}

fn to_openai_message(msg: &Message) -> OpenAIMessage {
    OpenAIMessage {
        role: msg.role.as_str().to_string(),
        content: msg.content.clone(),
    }
}

pub fn parse_finish_reason(raw: &str) -> FinishReason {
    let unified = match raw {
        "stop" => FinishReasonKind::Stop,
        "length" => FinishReasonKind::Length,
        "content_filter" => FinishReasonKind::ContentFilter,
        _ => FinishReasonKind::Other,
    };
    FinishReason::with_raw(unified, raw)
}
