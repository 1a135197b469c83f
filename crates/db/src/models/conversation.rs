//! Conversation entry model and DTOs.

use serde::Serialize;
use sitesmith_core::conversation::ConversationRole;
use sitesmith_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A conversation row from the `conversations` table. Never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversation {
    pub id: DbId,
    pub project_id: DbId,
    /// `user` or `assistant`, see [`ConversationRole`].
    pub role: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for appending a conversation entry.
#[derive(Debug, Clone)]
pub struct CreateConversation {
    pub project_id: DbId,
    pub role: ConversationRole,
    pub content: String,
}

impl CreateConversation {
    pub fn user(project_id: DbId, content: impl Into<String>) -> Self {
        Self {
            project_id,
            role: ConversationRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(project_id: DbId, content: impl Into<String>) -> Self {
        Self {
            project_id,
            role: ConversationRole::Assistant,
            content: content.into(),
        }
    }
}
