#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sitesmith_api::auth::jwt::{generate_access_token, JwtConfig};
use sitesmith_api::config::ServerConfig;
use sitesmith_api::router::build_app_router;
use sitesmith_api::state::AppState;
use sitesmith_core::oracle::{OracleError, SiteOracle};
use sitesmith_core::types::DbId;
use sitesmith_db::models::project::{CreateProject, Project};
use sitesmith_db::models::user::{CreateUser, User};
use sitesmith_db::repositories::{ProjectRepo, UserRepo};

pub const TEST_WEBHOOK_SECRET: &str = "whsec-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        body_limit_bytes: 50 * 1024 * 1024,
        jwt: JwtConfig {
            secret: "test-jwt-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 60,
        },
        billing_webhook_secret: TEST_WEBHOOK_SECRET.to_string(),
    }
}

/// Build the full application router around the given pool and oracle.
pub fn build_test_app(pool: PgPool, oracle: Arc<dyn SiteOracle>) -> Router {
    build_test_app_with_config(pool, oracle, test_config())
}

pub fn build_test_app_with_config(
    pool: PgPool,
    oracle: Arc<dyn SiteOracle>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        oracle,
    };
    build_app_router(state, &config)
}

/// Router whose oracle must never be reached.
pub fn build_app_without_oracle(pool: PgPool) -> Router {
    build_test_app(pool, Arc::new(ScriptedOracle::unreachable()))
}

// ---------------------------------------------------------------------------
// Scripted oracle
// ---------------------------------------------------------------------------

/// In-memory [`SiteOracle`] returning canned answers and recording inputs.
pub struct ScriptedOracle {
    /// `None` simulates a transport failure on the enhance call.
    enhanced: Option<String>,
    generated: String,
    pub generate_inputs: Mutex<Vec<(String, String)>>,
}

impl ScriptedOracle {
    pub fn new(enhanced: &str, generated: &str) -> Self {
        Self {
            enhanced: Some(enhanced.to_string()),
            generated: generated.to_string(),
            generate_inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            enhanced: None,
            generated: String::new(),
            generate_inputs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SiteOracle for ScriptedOracle {
    async fn enhance_prompt(&self, _message: &str) -> Result<String, OracleError> {
        self.enhanced
            .clone()
            .ok_or_else(|| OracleError::Transport("connection refused".to_string()))
    }

    async fn generate_code(
        &self,
        current_code: &str,
        instruction: &str,
    ) -> Result<String, OracleError> {
        self.generate_inputs
            .lock()
            .unwrap()
            .push((current_code.to_string(), instruction.to_string()));
        Ok(self.generated.clone())
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, name: &str, credits: i32) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@test.com"),
            credits: Some(credits),
        },
    )
    .await
    .expect("user creation should succeed")
}

pub async fn create_project(pool: &PgPool, user_id: DbId, code: &str, published: bool) -> Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            user_id,
            name: "Landing page".to_string(),
            initial_prompt: Some("A landing page for a bakery".to_string()),
            current_code: Some(code.to_string()),
            is_published: Some(published),
        },
    )
    .await
    .expect("project creation should succeed")
}

pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::DELETE, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        builder(Method::PUT, uri, Some(token))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST a raw body with an optional `x-signature` header.
pub async fn post_signed(
    app: Router,
    uri: &str,
    body: &[u8],
    signature: Option<&str>,
) -> Response<Body> {
    let mut builder = builder(Method::POST, uri, None).header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("x-signature", signature);
    }
    send(app, builder.body(Body::from(body.to_vec())).unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
