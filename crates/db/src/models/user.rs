//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitesmith_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// Identity itself is owned by the external session service; this row
/// only tracks what the workflow needs (display name and credit balance).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub credits: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Defaults to the column default (20) if omitted.
    pub credits: Option<i32>,
}
