//! Handler for the LLM-driven revision workflow.
//!
//! A revision costs [`REVISION_CREDIT_COST`] credits. The debit happens
//! before any oracle call. The steps after it run in a spawned task that
//! ends in either a commit or a best-effort refund, even if the request
//! itself is dropped.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sitesmith_core::error::CoreError;
use sitesmith_core::oracle::OracleError;
use sitesmith_core::revision::{
    enhanced_prompt_note, ensure_credits, insufficient_credits, sanitize_generated_code,
    validate_change_request, GENERATION_STARTED_NOTE, REVISION_CREDIT_COST,
    REVISION_FAILED_NOTE, REVISION_SUCCEEDED_NOTE, REVISION_VERSION_DESCRIPTION,
};
use sitesmith_core::types::DbId;
use sitesmith_db::models::conversation::CreateConversation;
use sitesmith_db::models::project::{CommitRevision, Project};
use sitesmith_db::repositories::{ConversationRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /project/revision/{project_id}`.
#[derive(Debug, Deserialize)]
pub struct RevisionRequest {
    pub message: Option<String>,
}

/// Success body carrying the id of the version that is now live.
#[derive(Debug, Serialize)]
pub struct RevisionResponse {
    pub message: &'static str,
    pub version_id: DbId,
}

/// POST /api/project/revision/{project_id}
pub async fn request_revision(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<RevisionRequest>,
) -> AppResult<Json<RevisionResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".into())))?;

    ensure_credits(user.credits)?;
    let message = validate_change_request(input.message.as_deref())?;

    let project = ProjectRepo::find_owned(&state.pool, project_id, user.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFoundMessage("Project not found".into())))?;

    ConversationRepo::create(&state.pool, &CreateConversation::user(project.id, message)).await?;

    let Some(balance) = UserRepo::debit_credits(&state.pool, user.id, REVISION_CREDIT_COST).await?
    else {
        // Another request spent the credits between the check and the debit.
        return Err(AppError::Core(insufficient_credits(user.credits)));
    };
    tracing::info!(
        user_id = user.id,
        project_id = project.id,
        credits = balance,
        "Credits debited for revision"
    );

    // Detached from the request future: a timeout or client disconnect
    // must not stop the workflow between the debit and its commit/refund.
    let user_id = user.id;
    let project_id = project.id;
    let task = tokio::spawn(settle_revision(
        state.clone(),
        user_id,
        project,
        message.to_string(),
    ));

    let version_id = match task.await {
        Ok(result) => result?,
        Err(join_err) => {
            refund(&state, user_id, project_id).await;
            return Err(AppError::InternalError(format!(
                "Revision task failed: {join_err}"
            )));
        }
    };

    tracing::info!(user_id, project_id, version_id, "Revision committed");
    Ok(Json(RevisionResponse {
        message: "Changes made successfully",
        version_id,
    }))
}

/// Run the post-debit steps and refund the debit if any of them fails.
async fn settle_revision(
    state: AppState,
    user_id: DbId,
    project: Project,
    message: String,
) -> AppResult<DbId> {
    let result = run_revision(&state, &project, &message).await;
    if result.is_err() {
        refund(&state, user_id, project.id).await;
    }
    result
}

/// Steps that run after the debit: enhance, narrate, generate, commit.
///
/// Returns the id of the committed version.
async fn run_revision(state: &AppState, project: &Project, message: &str) -> AppResult<DbId> {
    let enhanced = state.oracle.enhance_prompt(message).await?;
    tracing::debug!(project_id = project.id, "Prompt enhanced");

    ConversationRepo::create(
        &state.pool,
        &CreateConversation::assistant(project.id, enhanced_prompt_note(&enhanced)),
    )
    .await?;
    ConversationRepo::create(
        &state.pool,
        &CreateConversation::assistant(project.id, GENERATION_STARTED_NOTE),
    )
    .await?;

    let raw = state
        .oracle
        .generate_code(&project.current_code, &enhanced)
        .await?;

    let Some(code) = sanitize_generated_code(&raw) else {
        tracing::warn!(project_id = project.id, "Oracle returned an empty document");
        append_failure_note(state, project.id).await?;
        return Err(AppError::Oracle(OracleError::EmptyResponse));
    };

    let commit = ProjectRepo::commit_revision(
        &state.pool,
        &CommitRevision {
            project_id: project.id,
            expected_revision: project.revision,
            code,
            description: REVISION_VERSION_DESCRIPTION.to_string(),
            note: REVISION_SUCCEEDED_NOTE.to_string(),
        },
    )
    .await?;

    match commit {
        Some(commit) => Ok(commit.version.id),
        None => {
            append_failure_note(state, project.id).await?;
            Err(AppError::Core(CoreError::Conflict(
                "Project was modified while the revision was running, please try again".into(),
            )))
        }
    }
}

async fn append_failure_note(state: &AppState, project_id: DbId) -> AppResult<()> {
    ConversationRepo::create(
        &state.pool,
        &CreateConversation::assistant(project_id, REVISION_FAILED_NOTE),
    )
    .await?;
    Ok(())
}

/// Return the revision cost to the user. Failures are logged, not retried.
async fn refund(state: &AppState, user_id: DbId, project_id: DbId) {
    match UserRepo::add_credits(&state.pool, user_id, REVISION_CREDIT_COST).await {
        Ok(Some(balance)) => {
            tracing::info!(user_id, project_id, credits = balance, "Revision credits refunded");
        }
        Ok(None) => {
            tracing::error!(user_id, project_id, "Refund skipped, user no longer exists");
        }
        Err(e) => {
            tracing::error!(user_id, project_id, error = %e, "Failed to refund revision credits");
        }
    }
}
