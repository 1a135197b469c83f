//! Repository for the `conversations` table.

use sitesmith_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::conversation::{Conversation, CreateConversation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, role, content, created_at";

/// Append-only access to the per-project conversation trail.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Append a conversation entry, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateConversation,
    ) -> Result<Conversation, sqlx::Error> {
        let query = format!(
            "INSERT INTO conversations (project_id, role, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(input.project_id)
            .bind(input.role.as_str())
            .bind(&input.content)
            .fetch_one(executor)
            .await
    }

    /// List a project's conversation entries in creation order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Conversation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM conversations WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
