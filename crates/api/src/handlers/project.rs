//! Handlers for the `/project` resource outside the revision workflow.
//!
//! Owner-scoped reads answer 404 for projects that belong to someone else,
//! so existence is never revealed to non-owners.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sitesmith_core::error::CoreError;
use sitesmith_core::revision::{validate_saved_code, ROLLBACK_NOTE};
use sitesmith_core::types::DbId;
use sitesmith_db::models::conversation::{Conversation, CreateConversation};
use sitesmith_db::models::project::{Project, ProjectWithVersions, PublishedProject};
use sitesmith_db::repositories::{ConversationRepo, ProjectRepo, VersionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `PUT /project/save/{project_id}`.
#[derive(Debug, Deserialize)]
pub struct SaveCodeRequest {
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub project: ProjectWithVersions,
}

#[derive(Debug, Serialize)]
pub struct ConversationsResponse {
    pub conversations: Vec<Conversation>,
}

#[derive(Debug, Serialize)]
pub struct PublishedListResponse {
    pub projects: Vec<PublishedProject>,
}

#[derive(Debug, Serialize)]
pub struct PublishedCodeResponse {
    pub code: String,
}

fn project_not_found() -> AppError {
    AppError::Core(CoreError::NotFoundMessage("Project not found".into()))
}

/// Load a project owned by the caller or fail with a non-leaking 404.
async fn load_owned(state: &AppState, project_id: DbId, user_id: DbId) -> AppResult<Project> {
    ProjectRepo::find_owned(&state.pool, project_id, user_id)
        .await?
        .ok_or_else(project_not_found)
}

/// PUT /api/project/save/{project_id}
///
/// Overwrites the live document and detaches it from any version.
pub async fn save_code(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<SaveCodeRequest>,
) -> AppResult<Json<MessageResponse>> {
    let code = validate_saved_code(input.code.as_deref())?;

    ProjectRepo::save_code(&state.pool, project_id, auth.user_id, code)
        .await?
        .ok_or_else(project_not_found)?;

    tracing::info!(project_id, user_id = auth.user_id, "Project code saved");
    Ok(Json(MessageResponse::new("Project saved successfully")))
}

/// GET /api/project/rollback/{project_id}/{version_id}
pub async fn rollback(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, version_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    let project = load_owned(&state, project_id, auth.user_id).await?;

    VersionRepo::find_for_project(&state.pool, project.id, version_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFoundMessage("Version not found".into())))?;

    // The version may vanish with its project between the two reads.
    ProjectRepo::point_at_version(&state.pool, project.id, auth.user_id, version_id)
        .await?
        .ok_or_else(project_not_found)?;

    ConversationRepo::create(
        &state.pool,
        &CreateConversation::assistant(project.id, ROLLBACK_NOTE),
    )
    .await?;

    tracing::info!(project_id, version_id, user_id = auth.user_id, "Project rolled back");
    Ok(Json(MessageResponse::new("Version rolled back")))
}

/// DELETE /api/project/{project_id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = ProjectRepo::delete_owned(&state.pool, project_id, auth.user_id).await?;
    if !deleted {
        return Err(project_not_found());
    }
    tracing::info!(project_id, user_id = auth.user_id, "Project deleted");
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}

/// GET /api/project/preview/{project_id}
pub async fn preview(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<PreviewResponse>> {
    let project = load_owned(&state, project_id, auth.user_id).await?;
    let versions = VersionRepo::list_by_project(&state.pool, project.id).await?;
    Ok(Json(PreviewResponse {
        project: ProjectWithVersions { project, versions },
    }))
}

/// GET /api/project/conversations/{project_id}
pub async fn conversations(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ConversationsResponse>> {
    let project = load_owned(&state, project_id, auth.user_id).await?;
    let conversations = ConversationRepo::list_by_project(&state.pool, project.id).await?;
    Ok(Json(ConversationsResponse { conversations }))
}

/// GET /api/project/published
pub async fn list_published(
    State(state): State<AppState>,
) -> AppResult<Json<PublishedListResponse>> {
    let projects = ProjectRepo::list_published(&state.pool).await?;
    Ok(Json(PublishedListResponse { projects }))
}

/// GET /api/project/published/{project_id}
///
/// Missing and unpublished projects produce the same 404.
pub async fn get_published(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<PublishedCodeResponse>> {
    let project = ProjectRepo::find_published(&state.pool, project_id)
        .await?
        .ok_or_else(project_not_found)?;
    Ok(Json(PublishedCodeResponse {
        code: project.current_code,
    }))
}
