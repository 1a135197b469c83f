//! Route definitions for the `/user` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET    /credits    -> credits
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/credits", get(user::credits))
}
