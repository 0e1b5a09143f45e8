//! Creative relay: attaches the creative-agent persona to an inbound chat
//! history and streams the provider's completion back, fragment by fragment.
//!
//! ```rust,no_run
//! use creative_relay::{Relay, RelayConfig, Turn};
//! use futures::StreamExt;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let relay = Relay::from_config(RelayConfig::from_env()?);
//! let mut fragments = relay.handle(&[Turn::user("اكتب لي عنوان")]);
//! while let Some(fragment) = fragments.next().await {
//!     print!("{}", fragment?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod persona;
pub mod relay;
pub mod turn;

pub use config::RelayConfig;
pub use error::{RelayError, Result};
pub use persona::PersonaVariant;
pub use relay::{Fragment, FragmentStream, Relay};
pub use turn::{Role, Turn, parse_conversation, validate_conversation};
