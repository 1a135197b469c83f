//! Payment-provider webhook.
//!
//! The provider signs the raw request body; the signature is checked before
//! the body is parsed. Redelivered events are acknowledged without a second
//! top-up.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use sitesmith_core::billing::{verify_signature, BillingEvent, SIGNATURE_HEADER};
use sitesmith_core::error::CoreError;
use sitesmith_db::repositories::{CreditEventRepo, TopUpOutcome};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Acknowledgement body returned to the provider.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    /// Whether this delivery changed a balance.
    pub applied: bool,
}

/// POST /api/billing/webhook
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !verify_signature(&state.config.billing_webhook_secret, &body, signature) {
        tracing::warn!("Rejected billing webhook with invalid signature");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid webhook signature".into(),
        )));
    }

    let event: BillingEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {e}")))?;
    let event_id = event.id.clone();
    let event_type = event.event_type.clone();

    let Some(top_up) = event.into_top_up()? else {
        tracing::debug!(event_id = %event_id, event_type = %event_type, "Ignoring billing event");
        return Ok(Json(WebhookAck {
            received: true,
            applied: false,
        }));
    };

    match CreditEventRepo::apply_top_up(&state.pool, &top_up).await? {
        TopUpOutcome::Applied { balance } => {
            tracing::info!(
                event_id = %event_id,
                user_id = top_up.user_id,
                credits = top_up.credits,
                balance,
                "Credits topped up"
            );
            Ok(Json(WebhookAck {
                received: true,
                applied: true,
            }))
        }
        TopUpOutcome::Duplicate => {
            tracing::info!(event_id = %event_id, "Duplicate billing event acknowledged");
            Ok(Json(WebhookAck {
                received: true,
                applied: false,
            }))
        }
        TopUpOutcome::UnknownUser => Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: top_up.user_id,
        })),
    }
}
