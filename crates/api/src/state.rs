use std::sync::Arc;

use sitesmith_core::oracle::SiteOracle;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sitesmith_db::DbPool,
    /// Server configuration (JWT and webhook secrets are read from here).
    pub config: Arc<ServerConfig>,
    /// Text-generation oracle used by the revision workflow.
    pub oracle: Arc<dyn SiteOracle>,
}
