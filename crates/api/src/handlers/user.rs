//! Handlers for the `/user` resource.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sitesmith_core::error::CoreError;
use sitesmith_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreditsResponse {
    pub credits: i32,
}

/// GET /api/user/credits
pub async fn credits(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<CreditsResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".into())))?;
    Ok(Json(CreditsResponse {
        credits: user.credits,
    }))
}
