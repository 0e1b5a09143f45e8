//! Span helpers

/// Create a span for one relay invocation
///
/// Carries the model, persona variant and inbound turn count, and declares
/// the fields filled in when the stream closes.
///
/// # Example
///
/// ```rust
/// use creative_observability::relay_span;
///
/// let span = relay_span!("gpt-5.1", "standard", 3);
/// span.in_scope(|| tracing::debug!("assembling request"));
/// ```
#[macro_export]
macro_rules! relay_span {
    ($model:expr, $persona:expr, $turns:expr) => {
        tracing::info_span!(
            "relay.handle",
            llm.model = %$model,
            relay.persona = %$persona,
            relay.turns = $turns,
            relay.fragments = tracing::field::Empty,
            relay.duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span
///
/// # Example
///
/// ```rust
/// use creative_observability::record_error;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
/// record_error(&err);
/// ```
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record latency/duration in milliseconds on the current span
///
/// # Example
///
/// ```rust
/// use creative_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// record_duration("relay.duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
