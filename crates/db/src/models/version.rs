//! Version entity model and DTOs.
//!
//! Versions are immutable snapshots of a project's HTML document. They are
//! append-only and ordered by creation.

use serde::{Deserialize, Serialize};
use sitesmith_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A version row from the `versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Version {
    pub id: DbId,
    pub project_id: DbId,
    pub code: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new version.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVersion {
    pub project_id: DbId,
    pub code: String,
    pub description: String,
}
