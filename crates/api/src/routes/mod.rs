pub mod billing;
pub mod health;
pub mod project;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /project/revision/{project_id}               run a revision (POST, auth)
/// /project/save/{project_id}                   overwrite current code (PUT, auth)
/// /project/rollback/{project_id}/{version_id}  repoint at a version (GET, auth)
/// /project/preview/{project_id}                project + versions (GET, auth)
/// /project/conversations/{project_id}          conversation trail (GET, auth)
/// /project/published                           published projects (GET, public)
/// /project/published/{project_id}              published code (GET, public)
/// /project/{project_id}                        delete (DELETE, auth)
///
/// /user/credits                                credit balance (GET, auth)
///
/// /billing/webhook                             payment events (POST, signed)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/project", project::router())
        .nest("/user", user::router())
        .nest("/billing", billing::router())
}
