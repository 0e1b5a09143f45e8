//! Print an instruction turn's text.

use anyhow::Result;
use creative_relay::{PersonaVariant, RelayConfig};

use crate::output;

pub fn handle(variant: Option<PersonaVariant>) -> Result<()> {
    let variant = match variant {
        Some(v) => v,
        None => RelayConfig::from_env()?.persona,
    };

    if output::is_json() {
        let value = serde_json::json!({
            "variant": variant.as_str(),
            "instructions": variant.instructions(),
        });
        println!("{value}");
    } else {
        println!("{}", variant.instructions());
    }
    Ok(())
}
