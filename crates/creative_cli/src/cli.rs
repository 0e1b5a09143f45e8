//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use creative_relay::PersonaVariant;

/// Arabic creative copywriter relay
#[derive(Debug, Parser)]
#[command(name = "creative", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (one JSON object per line)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fragments printed as they arrive
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chat interactively; history lives only as long as the process
    Chat,
    /// Relay one conversation (JSON array of turns) and stream the reply
    Relay {
        /// Read the conversation from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the instruction text sent ahead of every conversation
    Persona {
        /// Variant to print (defaults to the configured one)
        #[arg(long, value_parser = parse_variant)]
        variant: Option<PersonaVariant>,
    },
    /// Show the effective configuration
    Config,
}

fn parse_variant(s: &str) -> Result<PersonaVariant, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relay_with_input() {
        let cli = Cli::try_parse_from(["creative", "relay", "--input", "conv.json"]).unwrap();
        match cli.command {
            Command::Relay { input } => assert_eq!(input, Some(PathBuf::from("conv.json"))),
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["creative", "chat", "-o", "json", "-v"]).unwrap();
        assert!(matches!(cli.command, Command::Chat));
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_persona_variant() {
        let cli =
            Cli::try_parse_from(["creative", "persona", "--variant", "clarify-first"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Persona {
                variant: Some(PersonaVariant::ClarifyFirst)
            }
        ));
    }

    #[test]
    fn test_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["creative", "persona", "--variant", "loud"]).is_err());
    }
}
