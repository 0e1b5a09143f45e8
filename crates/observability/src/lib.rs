//! Logging and span export for the creative relay.
//!
//! Stdout belongs to relayed fragments, so every log line is written to
//! stderr. When `OTEL_EXPORTER_OTLP_ENDPOINT` is set, spans are also exported
//! over OTLP/gRPC.
//!
//! ```no_run
//! use creative_observability::{ObservabilityConfig, init, shutdown};
//!
//! init(ObservabilityConfig::from_env().with_default_log_level("warn"))?;
//! tracing::info!("relay ready");
//! shutdown();
//! # Ok::<(), creative_observability::ObservabilityError>(())
//! ```
//!
//! Filter precedence: `OTEL_LOG_LEVEL` (or an explicit `log_level`), then
//! `RUST_LOG`, then the configured default.

pub mod config;
pub mod error;
pub mod spans;
pub mod telemetry;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use spans::{record_duration, record_error};
pub use telemetry::{init, shutdown};
