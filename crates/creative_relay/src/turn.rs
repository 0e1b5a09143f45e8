use serde::{Deserialize, Serialize};

use creative_llms::Message;

use crate::error::{RelayError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a conversation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        let role = match turn.role {
            Role::System => creative_llms::Role::System,
            Role::User => creative_llms::Role::User,
            Role::Assistant => creative_llms::Role::Assistant,
        };
        Message::new(role, turn.content.clone())
    }
}

/// Check that a caller-supplied conversation only holds user and assistant
/// turns. The system slot belongs to the instruction turn.
pub fn validate_conversation(conversation: &[Turn]) -> Result<()> {
    match conversation.iter().position(|t| t.role == Role::System) {
        Some(index) => Err(RelayError::InvalidConversation(format!(
            "turn {} has role 'system'; only 'user' and 'assistant' turns are accepted",
            index
        ))),
        None => Ok(()),
    }
}

/// Parse a conversation from its JSON form: `[{"role":"user","content":"..."}]`.
pub fn parse_conversation(json: &str) -> Result<Vec<Turn>> {
    let turns: Vec<Turn> = serde_json::from_str(json)
        .map_err(|e| RelayError::InvalidConversation(e.to_string()))?;
    validate_conversation(&turns)?;
    Ok(turns)
}
