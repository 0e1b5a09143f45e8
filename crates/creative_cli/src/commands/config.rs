//! Show the effective relay configuration.

use anyhow::Result;
use creative_relay::RelayConfig;
use creative_relay::config::{API_KEY_ENV, BASE_URL_ENV, PERSONA_ENV};

use crate::output;

fn rows(config: &RelayConfig) -> Vec<(&'static str, String)> {
    vec![
        ("model", config.model.clone()),
        ("temperature", config.temperature.to_string()),
        ("base_url", config.base_url.clone()),
        ("persona", config.persona.to_string()),
        (
            "api_key",
            config
                .masked_api_key()
                .unwrap_or_else(|| format!("(not set, export {API_KEY_ENV})")),
        ),
    ]
}

pub fn handle() -> Result<()> {
    let config = RelayConfig::from_env()?;
    output::kv_table("Relay configuration", &rows(&config));
    output::dim(&format!(
        "read from {API_KEY_ENV}, {BASE_URL_ENV} and {PERSONA_ENV}"
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_mask_key() {
        let config = RelayConfig::new().with_api_key("sk-abcdefghijklmnop");
        let rows = rows(&config);
        let key = rows.iter().find(|(k, _)| *k == "api_key").unwrap();
        assert_eq!(key.1, "********mnop");
        assert!(!key.1.contains("sk-"));
    }

    #[test]
    fn test_rows_report_missing_key() {
        let rows = rows(&RelayConfig::new());
        let key = rows.iter().find(|(k, _)| *k == "api_key").unwrap();
        assert!(key.1.contains("OPENAI_API_KEY"));
        assert!(rows.iter().any(|(k, v)| *k == "model" && v == "gpt-5.1"));
    }
}
