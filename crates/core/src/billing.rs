//! Payment webhook verification and credit top-up events.
//!
//! The payment provider delivers signed JSON events. Only the
//! `credits.purchased` event changes state: it tops up a user's balance.
//! Each event carries a provider-assigned id so redeliveries can be
//! detected and ignored.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::CoreError;
use crate::types::DbId;

/// Header carrying the hex-encoded HMAC-SHA256 signature of the raw body.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Event type that credits a user's balance.
pub const CREDITS_PURCHASED_EVENT: &str = "credits.purchased";

/// Upper bound for a single top-up, guarding against malformed events.
pub const MAX_TOP_UP_CREDITS: i32 = 100_000;

type HmacSha256 = Hmac<Sha256>;

/// A webhook event as delivered by the payment provider.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingEvent {
    /// Provider-assigned event id, unique per event.
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub user_id: Option<DbId>,
    pub credits: Option<i32>,
}

/// A validated credit top-up extracted from a [`BillingEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopUp {
    pub provider_event_id: String,
    pub user_id: DbId,
    pub credits: i32,
}

impl BillingEvent {
    /// Interpret the event as a top-up.
    ///
    /// Returns `Ok(None)` for event types that do not affect credits.
    pub fn into_top_up(self) -> Result<Option<TopUp>, CoreError> {
        if self.event_type != CREDITS_PURCHASED_EVENT {
            return Ok(None);
        }
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("Event id is required".to_string()));
        }
        let user_id = self
            .user_id
            .ok_or_else(|| CoreError::Validation("user_id is required".to_string()))?;
        let credits = self
            .credits
            .ok_or_else(|| CoreError::Validation("credits is required".to_string()))?;
        if credits <= 0 || credits > MAX_TOP_UP_CREDITS {
            return Err(CoreError::Validation(format!(
                "credits must be between 1 and {MAX_TOP_UP_CREDITS} (got {credits})"
            )));
        }
        Ok(Some(TopUp {
            provider_event_id: self.id,
            user_id,
            credits,
        }))
    }
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// Compute the hex-encoded HMAC-SHA256 signature of a webhook body.
pub fn compute_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a hex-encoded signature against the body in constant time.
pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    let Some(expected) = hex::decode(signature.trim()) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a hex string. Returns `None` on odd length or invalid digits.
    pub fn decode(text: &str) -> Option<Vec<u8>> {
        if text.len() % 2 != 0 {
            return None;
        }
        (0..text.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(text.get(i..i + 2)?, 16).ok())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
