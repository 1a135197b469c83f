//! Repository for the `users` table.

use sitesmith_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, credits, created_at, updated_at";

/// Provides CRUD and credit bookkeeping for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, credits)
             VALUES ($1, $2, COALESCE($3, 20))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.credits)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically debit `amount` credits if the balance covers it.
    ///
    /// Returns the new balance, or `None` if the user does not exist or
    /// cannot afford the debit. The balance never goes negative.
    pub async fn debit_credits(
        pool: &PgPool,
        id: DbId,
        amount: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE users SET credits = credits - $2
             WHERE id = $1 AND credits >= $2
             RETURNING credits",
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Atomically add `amount` credits (refunds and top-ups).
    ///
    /// Returns the new balance, or `None` if the user does not exist.
    pub async fn add_credits<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        amount: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE users SET credits = credits + $2 WHERE id = $1 RETURNING credits",
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(executor)
        .await?;
        Ok(row.map(|r| r.0))
    }
}
