//! Repository for the `credit_events` idempotency ledger.

use sitesmith_core::billing::TopUp;
use sqlx::PgPool;

use crate::repositories::UserRepo;

/// Outcome of applying a payment top-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopUpOutcome {
    /// Credits were added; carries the new balance.
    Applied { balance: i32 },
    /// The provider event was already applied earlier.
    Duplicate,
    /// The referenced user does not exist.
    UnknownUser,
}

/// Records payment top-ups exactly once per provider event.
pub struct CreditEventRepo;

impl CreditEventRepo {
    /// Credit the user and record the provider event in one transaction.
    ///
    /// A redelivered event (same `provider_event_id`) leaves the balance
    /// untouched and reports [`TopUpOutcome::Duplicate`].
    pub async fn apply_top_up(pool: &PgPool, top_up: &TopUp) -> Result<TopUpOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(balance) = UserRepo::add_credits(&mut *tx, top_up.user_id, top_up.credits).await?
        else {
            tx.rollback().await?;
            return Ok(TopUpOutcome::UnknownUser);
        };

        let inserted: Option<(i64,)> = sqlx::query_as(
            "INSERT INTO credit_events (provider_event_id, user_id, credits)
             VALUES ($1, $2, $3)
             ON CONFLICT (provider_event_id) DO NOTHING
             RETURNING id",
        )
        .bind(&top_up.provider_event_id)
        .bind(top_up.user_id)
        .bind(top_up.credits)
        .fetch_optional(&mut *tx)
        .await?;

        if inserted.is_none() {
            tx.rollback().await?;
            return Ok(TopUpOutcome::Duplicate);
        }

        tx.commit().await?;
        Ok(TopUpOutcome::Applied { balance })
    }
}
