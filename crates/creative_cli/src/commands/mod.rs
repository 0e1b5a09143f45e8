//! Command dispatch.

pub mod chat;
pub mod config;
pub mod persona;
pub mod relay;

use anyhow::Result;
use creative_relay::{Relay, RelayError, Turn};
use futures::StreamExt;

use crate::cli::{Cli, Command};
use crate::output;

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Chat => chat::handle().await,
        Command::Relay { input } => relay::handle(input).await,
        Command::Persona { variant } => persona::handle(variant),
        Command::Config => config::handle(),
    }
}

/// Stream one reply to stdout and return the text that was printed.
///
/// On a mid-stream failure the fragments already printed stay on screen and
/// the error is returned.
pub(crate) async fn stream_reply(
    relay: &Relay,
    conversation: &[Turn],
) -> std::result::Result<String, RelayError> {
    let spinner = output::spinner("Thinking...");
    let mut fragments = relay.handle(conversation);
    let mut reply = String::new();

    while let Some(item) = fragments.next().await {
        if !spinner.is_finished() {
            spinner.finish_and_clear();
        }
        match item {
            Ok(fragment) => {
                output::fragment(fragment.as_str());
                reply.push_str(fragment.as_str());
            }
            Err(e) => {
                if !reply.is_empty() {
                    output::reply_end();
                }
                return Err(e);
            }
        }
    }

    spinner.finish_and_clear();
    output::reply_end();
    Ok(reply)
}
