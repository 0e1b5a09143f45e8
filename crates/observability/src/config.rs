//! Logging and trace-export settings

use serde::{Deserialize, Serialize};

const DEFAULT_SERVICE_NAME: &str = "creative-relay";
const DEFAULT_FILTER: &str = "info";

/// Environment keys, checked in order, for each setting.
const SERVICE_NAME_KEYS: &[&str] = &["OTEL_SERVICE_NAME", "SERVICE_NAME"];
const SERVICE_VERSION_KEYS: &[&str] = &["OTEL_SERVICE_VERSION", "SERVICE_VERSION"];
const OTLP_ENDPOINT_KEYS: &[&str] = &["OTEL_EXPORTER_OTLP_ENDPOINT"];
const LOG_LEVEL_KEYS: &[&str] = &["OTEL_LOG_LEVEL"];

/// How the relay process logs and, optionally, exports spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `service.name` resource attribute and tracer name
    pub service_name: String,

    pub service_version: Option<String>,

    /// gRPC collector endpoint, e.g. `http://localhost:4317`. No export when unset.
    pub otlp_endpoint: Option<String>,

    /// Human-readable log lines on stderr
    pub enable_console: bool,

    /// Explicit filter directive. Takes precedence over `RUST_LOG`.
    pub log_level: Option<String>,

    /// Filter directive used when neither `log_level` nor `RUST_LOG` is set
    pub default_log_level: String,

    pub resource_attributes: Vec<(String, String)>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

impl ObservabilityConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
            default_log_level: DEFAULT_FILTER.to_string(),
            resource_attributes: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_default_log_level(mut self, level: impl Into<String>) -> Self {
        self.default_log_level = level.into();
        self
    }

    pub fn with_resource_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.resource_attributes.push((key.into(), value.into()));
        self
    }

    /// Settings from the process environment.
    ///
    /// | setting | variables |
    /// |---------|-----------|
    /// | `service_name` | `OTEL_SERVICE_NAME`, `SERVICE_NAME` |
    /// | `service_version` | `OTEL_SERVICE_VERSION`, `SERVICE_VERSION` |
    /// | `otlp_endpoint` | `OTEL_EXPORTER_OTLP_ENDPOINT` |
    /// | `log_level` | `OTEL_LOG_LEVEL` |
    ///
    /// `RUST_LOG` is not read here; [`crate::init`] consults it when
    /// `log_level` is unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .find(|value| !value.trim().is_empty())
        };

        let mut config = Self::default();
        if let Some(name) = first(SERVICE_NAME_KEYS) {
            config.service_name = name;
        }
        config.service_version = first(SERVICE_VERSION_KEYS);
        config.otlp_endpoint = first(OTLP_ENDPOINT_KEYS);
        config.log_level = first(LOG_LEVEL_KEYS);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_is_console_only() {
        let config = ObservabilityConfig::from_lookup(lookup(&[]));
        assert_eq!(config.service_name, "creative-relay");
        assert!(config.enable_console);
        assert!(config.otlp_endpoint.is_none());
        assert!(config.log_level.is_none());
        assert_eq!(config.default_log_level, "info");
    }

    #[test]
    fn test_otel_names_win_over_fallbacks() {
        let config = ObservabilityConfig::from_lookup(lookup(&[
            ("OTEL_SERVICE_NAME", "creative-cli"),
            ("SERVICE_NAME", "ignored"),
            ("SERVICE_VERSION", "0.1.0"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
            ("OTEL_LOG_LEVEL", "creative_relay=debug"),
        ]));
        assert_eq!(config.service_name, "creative-cli");
        assert_eq!(config.service_version.as_deref(), Some("0.1.0"));
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
        assert_eq!(config.log_level.as_deref(), Some("creative_relay=debug"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = ObservabilityConfig::from_lookup(lookup(&[
            ("OTEL_SERVICE_NAME", "  "),
            ("SERVICE_NAME", "relay-fallback"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", ""),
        ]));
        assert_eq!(config.service_name, "relay-fallback");
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("creative-cli")
            .with_console(false)
            .with_default_log_level("warn")
            .with_resource_attribute("deployment", "dev");
        assert!(!config.enable_console);
        assert_eq!(config.default_log_level, "warn");
        assert_eq!(config.resource_attributes, vec![("deployment".into(), "dev".into())]);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ObservabilityConfig =
            serde_json::from_str(r#"{"otlp_endpoint": "http://collector:4317"}"#).unwrap();
        assert_eq!(config.service_name, "creative-relay");
        assert!(config.enable_console);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
    }
}
