//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitesmith_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::version::Version;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub initial_prompt: String,
    /// Latest complete HTML document, or empty before the first generation.
    pub current_code: String,
    /// The version considered live. `None` after a manual save.
    pub current_version_id: Option<DbId>,
    /// Optimistic concurrency counter; bumped on every live-document write.
    pub revision: i64,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub user_id: DbId,
    pub name: String,
    pub initial_prompt: Option<String>,
    pub current_code: Option<String>,
    /// Defaults to `false` if omitted.
    pub is_published: Option<bool>,
}

/// A project together with its full version history (oldest first).
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithVersions {
    #[serde(flatten)]
    pub project: Project,
    pub versions: Vec<Version>,
}

/// Public owner details attached to published projects.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectOwner {
    pub id: DbId,
    pub name: String,
}

/// Row shape of the published-projects query (project joined with owner).
#[derive(Debug, Clone, FromRow)]
pub struct PublishedProjectRow {
    #[sqlx(flatten)]
    pub project: Project,
    pub owner_name: String,
}

/// A published project as listed in the public gallery.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedProject {
    #[serde(flatten)]
    pub project: Project,
    pub user: ProjectOwner,
}

impl From<PublishedProjectRow> for PublishedProject {
    fn from(row: PublishedProjectRow) -> Self {
        let user = ProjectOwner {
            id: row.project.user_id,
            name: row.owner_name,
        };
        Self {
            project: row.project,
            user,
        }
    }
}

/// Everything written atomically when a revision completes.
#[derive(Debug, Clone)]
pub struct CommitRevision {
    pub project_id: DbId,
    /// `Project::revision` as read before the oracle calls.
    pub expected_revision: i64,
    pub code: String,
    pub description: String,
    /// Assistant narration appended alongside the new version.
    pub note: String,
}

/// Result of a committed revision.
#[derive(Debug, Clone)]
pub struct RevisionCommit {
    pub project: Project,
    pub version: Version,
}
