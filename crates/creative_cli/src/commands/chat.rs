//! Interactive chat. History is kept in memory for the life of the process.

use anyhow::{Context, Result};
use creative_relay::{Relay, RelayConfig, RelayError, Turn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output;

enum Input<'a> {
    Quit,
    Reset,
    Skip,
    Message(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Skip,
        "/exit" | "/quit" => Input::Quit,
        "/reset" => Input::Reset,
        text => Input::Message(text),
    }
}

pub async fn handle() -> Result<()> {
    let config = RelayConfig::from_env()?;
    output::dim(&format!(
        "model {} · persona {} · /reset clears history · /exit quits",
        config.model, config.persona
    ));
    let relay = Relay::from_config(config);

    let mut history: Vec<Turn> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        output::prompt("you ›");
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };

        match classify(&line) {
            Input::Skip => continue,
            Input::Quit => break,
            Input::Reset => {
                history.clear();
                output::dim("history cleared");
            }
            Input::Message(text) => {
                history.push(Turn::user(text));
                match super::stream_reply(&relay, &history).await {
                    Ok(reply) => history.push(Turn::assistant(reply)),
                    Err(e @ RelayError::Config(_)) => return Err(e.into()),
                    Err(e) => {
                        // The failed exchange is not kept; the user can retry.
                        history.pop();
                        output::error(&e.to_string());
                    }
                }
            }
        }
    }

    Ok(())
}
