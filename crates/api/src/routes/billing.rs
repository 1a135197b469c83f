//! Route definitions for the payment-provider webhook.

use axum::routing::post;
use axum::Router;

use crate::handlers::billing;
use crate::state::AppState;

/// Routes mounted at `/billing`.
///
/// ```text
/// POST   /webhook    -> webhook (HMAC-signed, no session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(billing::webhook))
}
