//! Global subscriber setup
//!
//! Log lines go to stderr. Spans are exported over OTLP/gRPC only when a
//! collector endpoint is configured.

use once_cell::sync::OnceCell;
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;

static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Install the process-wide subscriber.
///
/// Returns [`ObservabilityError::AlreadyInitialized`] on a second call. An
/// exporter that cannot be built only costs the OTLP layer; console logging
/// still comes up and the failure is logged as a warning.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let directive = filter_directive(&config, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| ObservabilityError::InitFailed(format!("bad filter '{directive}': {e}")))?;

    let console = config
        .enable_console
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (export, export_error) = match config.otlp_endpoint.as_deref() {
        None => (None, None),
        Some(endpoint) => match otlp_tracer(&config, endpoint) {
            Ok(tracer) => (Some(OpenTelemetryLayer::new(tracer)), None),
            Err(e) => (None, Some(e)),
        },
    };

    Registry::default()
        .with(filter)
        .with(console)
        .with(export)
        .try_init()
        .map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))?;

    match (config.otlp_endpoint.as_deref(), export_error) {
        (Some(endpoint), Some(e)) => tracing::warn!(
            service.name = %config.service_name,
            otlp.endpoint = endpoint,
            error = %e,
            "OTLP export unavailable, logging to console only"
        ),
        (Some(endpoint), None) => tracing::debug!(
            service.name = %config.service_name,
            otlp.endpoint = endpoint,
            "OTLP export enabled"
        ),
        (None, _) => tracing::debug!(
            service.name = %config.service_name,
            filter = %directive,
            "Logging initialized"
        ),
    }

    Ok(())
}

/// Pick the filter: explicit level, then `RUST_LOG`, then the configured default.
fn filter_directive(config: &ObservabilityConfig, rust_log: Option<String>) -> String {
    config
        .log_level
        .clone()
        .or(rust_log)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| config.default_log_level.clone())
}

fn resource(config: &ObservabilityConfig) -> Resource {
    let service = std::iter::once(KeyValue::new("service.name", config.service_name.clone()));
    let version = config
        .service_version
        .iter()
        .map(|v| KeyValue::new("service.version", v.clone()));
    let extra = config
        .resource_attributes
        .iter()
        .map(|(k, v)| KeyValue::new(k.clone(), v.clone()));

    Resource::builder()
        .with_attributes(service.chain(version).chain(extra))
        .build()
}

/// Build the batch-exporting tracer provider, register it globally and keep
/// it for [`shutdown`].
fn otlp_tracer(config: &ObservabilityConfig, endpoint: &str) -> Result<SdkTracer, ObservabilityError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource(config))
        .build();

    let tracer = provider.tracer(config.service_name.clone());
    global::set_tracer_provider(provider.clone());
    let _ = TRACER_PROVIDER.set(provider);
    Ok(tracer)
}

/// Flush pending spans. No-op when export was never enabled.
pub fn shutdown() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("failed to flush traces: {e}");
        }
    }
}
