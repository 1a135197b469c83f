//! Tests for `AppError` to HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server or database is needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use sitesmith_api::error::AppError;
use sitesmith_core::error::CoreError;
use sitesmith_core::oracle::OracleError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_message_returns_404() {
    let err = AppError::Core(CoreError::NotFoundMessage("Project not found".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Project not found");
}

#[tokio::test]
async fn entity_not_found_includes_id() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "User",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "User with id 42 not found");
}

#[tokio::test]
async fn insufficient_credits_returns_403() {
    let err = AppError::Core(CoreError::InsufficientCredits {
        required: 5,
        available: 2,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "INSUFFICIENT_CREDITS");
    assert_eq!(json["message"], "Add more credits to make changes");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Please enter a valid prompt".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unauthorized_returns_401() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("Unauthorized".into()))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn conflict_returns_409() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Conflict("try again".into()))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn empty_generation_is_generation_failed() {
    let (status, json) = error_to_response(AppError::Oracle(OracleError::EmptyResponse)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "GENERATION_FAILED");
    assert_eq!(json["message"], "Failed to generate code");
}

#[tokio::test]
async fn oracle_api_error_hides_upstream_body() {
    let err = AppError::Oracle(OracleError::Api {
        status: 502,
        body: "upstream secret detail".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "ORACLE_ERROR");
    assert!(!json["message"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_database_errors_are_sanitized() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "An internal error occurred");
}

#[tokio::test]
async fn internal_error_hides_detail() {
    let err = AppError::InternalError("Revision task failed: task panicked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "An internal error occurred");
}

#[test]
fn core_errors_convert_into_app_error() {
    let err: AppError = CoreError::Validation("Code is required".into()).into();
    assert_matches!(err, AppError::Core(CoreError::Validation(msg)) if msg == "Code is required");
}
