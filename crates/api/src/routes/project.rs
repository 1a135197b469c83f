//! Route definitions for the `/project` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{project, revision};
use crate::state::AppState;

/// Routes mounted at `/project`.
///
/// ```text
/// POST   /revision/{project_id}               -> revision::request_revision
/// PUT    /save/{project_id}                   -> save_code
/// GET    /rollback/{project_id}/{version_id}  -> rollback
/// GET    /preview/{project_id}                -> preview
/// GET    /conversations/{project_id}          -> conversations
/// GET    /published                           -> list_published
/// GET    /published/{project_id}              -> get_published
/// DELETE /{project_id}                        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/revision/{project_id}", post(revision::request_revision))
        .route("/save/{project_id}", put(project::save_code))
        .route(
            "/rollback/{project_id}/{version_id}",
            get(project::rollback),
        )
        .route("/preview/{project_id}", get(project::preview))
        .route("/conversations/{project_id}", get(project::conversations))
        .route("/published", get(project::list_published))
        .route("/published/{project_id}", get(project::get_published))
        .route("/{project_id}", delete(project::delete))
}
