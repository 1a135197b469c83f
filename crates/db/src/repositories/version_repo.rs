//! Repository for the `versions` table.

use sitesmith_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::version::{CreateVersion, Version};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, code, description, created_at";

/// Append-only access to project versions.
pub struct VersionRepo;

impl VersionRepo {
    /// Insert a new version, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateVersion,
    ) -> Result<Version, sqlx::Error> {
        let query = format!(
            "INSERT INTO versions (project_id, code, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(input.project_id)
            .bind(&input.code)
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    /// Find a version by ID, scoped to its project.
    ///
    /// Returns `None` when the version belongs to a different project.
    pub async fn find_for_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Version>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM versions WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Version>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List all versions of a project in creation order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Version>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Count the versions of a project.
    pub async fn count_by_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM versions WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
