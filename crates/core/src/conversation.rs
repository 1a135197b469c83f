//! Conversation trail roles.
//!
//! Every project keeps an append-only chat log. Entries are written either
//! on behalf of the user (their raw request) or by the assistant (narration
//! of what the workflow did).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Author of a conversation entry. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationRole {
    User,
    Assistant,
}

impl ConversationRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for ConversationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConversationRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(CoreError::Validation(format!(
                "Unknown conversation role '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_roles() {
        assert_eq!("user".parse::<ConversationRole>().unwrap(), ConversationRole::User);
        assert_eq!(
            "assistant".parse::<ConversationRole>().unwrap(),
            ConversationRole::Assistant
        );
    }

    #[test]
    fn rejects_unknown_role() {
        assert!("system".parse::<ConversationRole>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ConversationRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
