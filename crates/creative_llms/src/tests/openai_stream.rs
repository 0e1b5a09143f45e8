//! OpenAI provider against a local SSE server.

use futures::StreamExt;
use mockito::Matcher;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::error::Error;
use crate::provider::Provider;
use crate::providers::openai::OpenAIConfig;
use crate::providers::OpenAIProvider;
use crate::types::{FinishReasonKind, GenerateRequest, Message, StreamEvent};

fn sse(events: &[&str]) -> String {
    events
        .iter()
        .map(|data| format!("data: {}\n\n", data))
        .collect()
}

fn delta(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion.chunk",
        "model": "gpt-5.1",
        "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}]
    })
    .to_string()
}

fn finish() -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion.chunk",
        "model": "gpt-5.1",
        "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
    })
    .to_string()
}

fn provider_for(server: &mockito::ServerGuard) -> OpenAIProvider {
    OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url(server.url()))
}

fn request() -> GenerateRequest {
    GenerateRequest::new(
        "gpt-5.1",
        vec![Message::system("persona"), Message::user("اكتب لي عنوان")],
    )
    .with_temperature(0.7)
}

async fn collect(provider: &OpenAIProvider) -> Vec<Result<StreamEvent, Error>> {
    provider
        .stream(request())
        .await
        .expect("stream should open")
        .collect()
        .await
}

#[tokio::test]
async fn test_stream_posts_request_and_yields_deltas() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let (d1, d2, d3, fin) = (delta("مرحبا"), delta(""), delta(" بك"), finish());
    let body = sse(&[d1.as_str(), d2.as_str(), d3.as_str(), fin.as_str(), "[DONE]"]);

    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-5.1",
            "stream": true,
            "temperature": 0.7,
            "messages": [
                {"role": "system", "content": "persona"},
                {"role": "user", "content": "اكتب لي عنوان"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(body)
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;
    mock.assert_async().await;

    let events: Vec<StreamEvent> = events.into_iter().collect::<Result<_, _>>()?;
    assert_eq!(events[0], StreamEvent::start("chatcmpl-1"));
    assert_eq!(events[1], StreamEvent::text_delta("chatcmpl-1", "مرحبا"));
    assert_eq!(events[2], StreamEvent::text_delta("chatcmpl-1", ""));
    assert_eq!(events[3], StreamEvent::text_delta("chatcmpl-1", " بك"));
    match &events[4] {
        StreamEvent::Finish { reason } => assert_eq!(reason.unified, FinishReasonKind::Stop),
        other => panic!("Expected Finish, got {:?}", other),
    }
    assert_eq!(events.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_stream_ends_without_done_marker() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let d1 = delta("a");
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(&[d1.as_str()]))
        .create_async()
        .await;

    let events: Vec<StreamEvent> = collect(&provider_for(&server))
        .await
        .into_iter()
        .collect::<Result<_, _>>()?;
    assert_eq!(
        events,
        vec![
            StreamEvent::start("chatcmpl-1"),
            StreamEvent::text_delta("chatcmpl-1", "a")
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_is_provider_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;
    assert_eq!(events.len(), 1);
    match &events[0] {
        Err(Error::Provider(message)) => {
            assert!(message.contains("401"));
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("Expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_provider_error() {
    // Port 1 is reserved and closed on test hosts.
    let provider =
        OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url("http://127.0.0.1:1"));
    let events = collect(&provider).await;
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Err(Error::Provider(_))));
}

#[tokio::test]
async fn test_garbage_after_deltas_is_stream_error() {
    let mut server = mockito::Server::new_async().await;
    let d1 = delta("أول");
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(&[d1.as_str(), "{not json", "[DONE]"]))
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[1], Ok(StreamEvent::TextDelta { delta, .. }) if delta == "أول"));
    assert!(matches!(events[2], Err(Error::Stream(_))));
}

#[tokio::test]
async fn test_wrong_content_type_is_provider_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html></html>")
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Err(Error::Provider(_))));
}

#[tokio::test]
async fn test_in_band_error_is_stream_error() {
    let mut server = mockito::Server::new_async().await;
    let d1 = delta("a");
    let failure = r#"{"error":{"message":"server overloaded","type":"server_error"}}"#;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(&[d1.as_str(), failure, "[DONE]"]))
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[1], Ok(StreamEvent::TextDelta { delta, .. }) if delta == "a"));
    match &events[2] {
        Err(Error::Stream(message)) => assert!(message.contains("server overloaded")),
        other => panic!("Expected stream error, got {:?}", other),
    }
}

/// Accept one connection, answer with a chunked SSE response holding a single
/// frame, then close the socket without the terminating chunk.
async fn serve_one_frame_then_drop(frame: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the request so closing does not reset the connection.
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if request.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        let head = "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ntransfer-encoding: chunked\r\n\r\n";
        let chunk = format!("{:x}\r\n{}\r\n", frame.len(), frame);
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(chunk.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_connection_dropped_after_open_is_stream_error() {
    let url = serve_one_frame_then_drop(format!("data: {}\n\n", delta("a"))).await;
    let provider = OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url(url));

    let events = collect(&provider).await;
    assert_eq!(events.len(), 3, "events: {:?}", events);
    assert!(matches!(&events[0], Ok(StreamEvent::Start { .. })));
    assert!(matches!(&events[1], Ok(StreamEvent::TextDelta { delta, .. }) if delta == "a"));
    match &events[2] {
        Err(Error::Stream(message)) => assert!(message.contains("Stream interrupted")),
        other => panic!("Expected stream error, got {:?}", other),
    }
}
