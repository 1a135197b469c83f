//! Repository for the `projects` table.

use sitesmith_core::types::DbId;
use sqlx::PgPool;

use crate::models::conversation::CreateConversation;
use crate::models::project::{
    CommitRevision, CreateProject, Project, PublishedProject, PublishedProjectRow,
    RevisionCommit,
};
use crate::models::version::CreateVersion;
use crate::repositories::{ConversationRepo, VersionRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, initial_prompt, current_code, current_version_id, \
                       revision, is_published, created_at, updated_at";

/// Same columns qualified with the `p` alias, for joins.
const P_COLUMNS: &str = "p.id, p.user_id, p.name, p.initial_prompt, p.current_code, \
                         p.current_version_id, p.revision, p.is_published, p.created_at, \
                         p.updated_at";

/// Provides CRUD and live-pointer operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, name, initial_prompt, current_code, is_published)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.initial_prompt)
            .bind(&input.current_code)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID, only if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List published projects with their owner, newest first.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<PublishedProject>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, u.name AS owner_name
             FROM projects p
             JOIN users u ON u.id = p.user_id
             WHERE p.is_published
             ORDER BY p.created_at DESC, p.id DESC"
        );
        let rows = sqlx::query_as::<_, PublishedProjectRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PublishedProject::from).collect())
    }

    /// Find a project by ID, only if it is published.
    pub async fn find_published(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND is_published");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the live document with manually edited code.
    ///
    /// Clears `current_version_id`: a manual save is not tied to any
    /// version snapshot. Returns `None` if the project is not owned by
    /// `user_id`.
    pub async fn save_code(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        code: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                current_code = $3,
                current_version_id = NULL,
                revision = revision + 1
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Repoint the live document at an existing version of the same project.
    ///
    /// Copies the version's code into `current_code`. No version is created.
    /// Returns `None` if the project is not owned by `user_id` or the
    /// version belongs to another project.
    pub async fn point_at_version(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        version_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects p SET
                current_code = v.code,
                current_version_id = v.id,
                revision = p.revision + 1
             FROM versions v
             WHERE p.id = $1 AND p.user_id = $2 AND v.id = $3 AND v.project_id = p.id
             RETURNING {P_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .bind(version_id)
            .fetch_optional(pool)
            .await
    }

    /// Persist a completed revision in one transaction.
    ///
    /// Inserts the new version and its narration, then moves the live
    /// pointer to it, guarded by a compare-and-swap on `revision`. If the
    /// project changed since `expected_revision` was read, nothing is
    /// written and `None` is returned.
    pub async fn commit_revision(
        pool: &PgPool,
        input: &CommitRevision,
    ) -> Result<Option<RevisionCommit>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let version = VersionRepo::create(
            &mut *tx,
            &CreateVersion {
                project_id: input.project_id,
                code: input.code.clone(),
                description: input.description.clone(),
            },
        )
        .await?;

        ConversationRepo::create(
            &mut *tx,
            &CreateConversation::assistant(input.project_id, input.note.clone()),
        )
        .await?;

        let query = format!(
            "UPDATE projects SET
                current_code = $3,
                current_version_id = $4,
                revision = revision + 1
             WHERE id = $1 AND revision = $2
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(input.project_id)
            .bind(input.expected_revision)
            .bind(&version.code)
            .bind(version.id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            tracing::warn!(
                project_id = input.project_id,
                expected_revision = input.expected_revision,
                "Project changed during revision, discarding version"
            );
            tx.rollback().await?;
            return Ok(None);
        };

        tx.commit().await?;
        Ok(Some(RevisionCommit { project, version }))
    }

    /// Delete a project owned by `user_id`. Versions and conversation
    /// entries cascade. Returns `true` if a row was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
