//! One-shot relay: a conversation in, one streamed reply out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use creative_relay::{Relay, RelayConfig, parse_conversation};
use tokio::io::AsyncReadExt;

pub async fn handle(input: Option<PathBuf>) -> Result<()> {
    let raw = match &input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read conversation from stdin")?;
            buf
        }
    };

    let conversation = parse_conversation(&raw)
        .context("conversation must be a JSON array of {\"role\", \"content\"} turns")?;

    let relay = Relay::from_config(RelayConfig::from_env()?);
    tracing::debug!(turns = conversation.len(), "relaying conversation");
    super::stream_reply(&relay, &conversation).await?;
    Ok(())
}
