//! Router-level checks that resolve before any storage is touched.

use std::future::Future;

use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use quill_blog::domain::types::CodeDelivery;
use quill_blog::error::BlogServiceError;
use quill_blog::infra::mail_queue::{DeliveryHandler, MailQueue};
use quill_blog::router::build_router;
use quill_blog::state::AppState;
use quill_domain::user::UserRole;
use quill_testing::auth::MockAuth;

use crate::helpers::TEST_JWT_SECRET;

struct Discard;

impl DeliveryHandler for Discard {
    fn handle(
        &self,
        _job: CodeDelivery,
    ) -> impl Future<Output = Result<(), BlogServiceError>> + Send {
        std::future::ready(Ok(()))
    }
}

fn server() -> TestServer {
    // Nothing listens on port 1; the pool only dials on first use.
    let redis = deadpool_redis::Config::from_url("redis://127.0.0.1:1")
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .unwrap();
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        redis,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        media_dir: std::env::temp_dir(),
        mail_queue: MailQueue::start(Discard, 1, 4),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn bearer(auth: MockAuth) -> HeaderValue {
    auth.header_value(TEST_JWT_SECRET)
}

#[tokio::test]
async fn should_answer_liveness_with_request_id() {
    let response = server().get("/healthz").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_unready_without_backends() {
    let response = server().get("/readyz").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["checks"]["database"], "unavailable");
    assert_eq!(body["checks"]["redis"], "unavailable");
}

#[tokio::test]
async fn should_require_token_for_update_password() {
    let response = server()
        .post("/v1/auth/update-password")
        .json(&json!({ "password": "brand-new" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_reject_expired_token() {
    let response = server()
        .post("/v1/auth/update-password")
        .add_header(AUTHORIZATION, bearer(MockAuth::password_reset(1).expired()))
        .json(&json!({ "password": "brand-new" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_accept_reset_token_for_update_password() {
    // Gets past the extractor and fails validation, before any storage access.
    let response = server()
        .post("/v1/auth/update-password")
        .add_header(AUTHORIZATION, bearer(MockAuth::password_reset(1)))
        .json(&json!({ "password": "tiny" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn should_refuse_reset_token_on_session_routes() {
    let response = server()
        .get("/v1/users/me")
        .add_header(AUTHORIZATION, bearer(MockAuth::password_reset(1)))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_forbid_category_mutation_for_plain_user() {
    let response = server()
        .post("/v1/categories")
        .add_header(AUTHORIZATION, bearer(MockAuth::session(1, UserRole::User)))
        .json(&json!({ "title": "Rust" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_forbid_user_creation_for_plain_user() {
    let response = server()
        .post("/v1/users")
        .add_header(AUTHORIZATION, bearer(MockAuth::session(2, UserRole::User)))
        .json(&json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@example.com",
            "type": "superadmin",
            "password": "secret1"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_validate_registration_before_storage() {
    let response = server()
        .post("/v1/auth/register")
        .json(&json!({
            "first_name": "Alan",
            "last_name": "Turing",
            "email": "not-an-email",
            "password": "secret1"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn should_require_session_for_upload() {
    let response = server().post("/v1/file-upload").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
